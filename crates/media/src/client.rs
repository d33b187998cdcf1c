//! REST client for the image-hosting API.
//!
//! Wraps the host's upload and destroy endpoints using [`reqwest`]. Requests
//! are authenticated with the account's API key plus a SHA-256 signature over
//! the sorted request parameters and the API secret.

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::config::MediaConfig;

/// Errors from the image-hosting API layer.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The host returned a non-2xx status code.
    #[error("Image host error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// A successfully hosted image.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    /// Permanent public URL of the stored image.
    pub url: String,
    /// Host-side identifier, needed for deletion.
    pub public_id: String,
    /// Stored size in bytes as reported by the host.
    pub size_bytes: i64,
}

/// Raw JSON shape of the host's upload response.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    bytes: i64,
}

/// Raw JSON shape of the host's destroy response.
#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// HTTP client for one image-hosting account.
pub struct ImageHost {
    client: reqwest::Client,
    config: MediaConfig,
}

impl ImageHost {
    /// Create a new client for the configured account.
    pub fn new(config: MediaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Upload image bytes, returning the hosted image's URL and metadata.
    ///
    /// The host re-encodes and serves the image itself; only the returned
    /// URL is persisted by callers.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        folder: &str,
    ) -> Result<UploadedImage, MediaError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[("folder", folder), ("timestamp", &timestamp)]);

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("folder", folder.to_string())
            .text("timestamp", timestamp)
            .text("api_key", self.config.api_key.clone())
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let response = self
            .client
            .post(format!(
                "{}/v1_1/{}/image/upload",
                self.config.api_base, self.config.cloud_name
            ))
            .multipart(form)
            .send()
            .await?;

        let upload: UploadResponse = Self::parse_response(response).await?;
        tracing::info!(url = %upload.secure_url, "Image uploaded to host");

        Ok(UploadedImage {
            url: upload.secure_url,
            public_id: upload.public_id,
            size_bytes: upload.bytes,
        })
    }

    /// Delete a hosted image by its public URL.
    ///
    /// Returns `Ok(false)` when the host does not know the image (already
    /// gone, or a URL it never issued). Callers on best-effort cleanup paths
    /// log that and move on.
    pub async fn delete_by_url(&self, image_url: &str) -> Result<bool, MediaError> {
        let Some(public_id) = public_id_from_url(image_url) else {
            tracing::warn!(url = %image_url, "Could not derive a public id from URL");
            return Ok(false);
        };

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", &public_id), ("timestamp", &timestamp)]);

        let params = [
            ("public_id", public_id.as_str()),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.config.api_key.as_str()),
            ("signature_algorithm", "sha256"),
            ("signature", signature.as_str()),
        ];

        let response = self
            .client
            .post(format!(
                "{}/v1_1/{}/image/destroy",
                self.config.api_base, self.config.cloud_name
            ))
            .form(&params)
            .send()
            .await?;

        let destroy: DestroyResponse = Self::parse_response(response).await?;
        if destroy.result == "ok" {
            tracing::info!(public_id = %public_id, "Image deleted from host");
            Ok(true)
        } else {
            tracing::warn!(public_id = %public_id, result = %destroy.result,
                "Image host refused deletion");
            Ok(false)
        }
    }

    /// SHA-256 signature over the sorted `key=value` parameter string plus
    /// the API secret, hex-encoded.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<_> = params.to_vec();
        sorted.sort_by_key(|(name, _)| *name);

        let joined: Vec<String> = sorted
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();

        let mut hasher = Sha256::new();
        hasher.update(joined.join("&").as_bytes());
        hasher.update(self.config.api_secret.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Deserialize a 2xx response body, or surface status + body as an error.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, MediaError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

/// Derive the host-side public id from a delivery URL.
///
/// The id is the last two path segments with the file extension stripped
/// (`.../v123/news/abc.jpg` -> `news/abc`). Returns `None` for URLs without
/// a usable path.
fn public_id_from_url(url: &str) -> Option<String> {
    let path = url.split("://").nth(1).unwrap_or(url);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    // First segment is the hostname; at least one more is needed.
    if segments.len() < 2 {
        return None;
    }

    let tail = if segments.len() >= 3 {
        segments[segments.len() - 2..].join("/")
    } else {
        segments[segments.len() - 1].to_string()
    };

    let public_id = match tail.rfind('.') {
        Some(dot) => tail[..dot].to_string(),
        None => tail,
    };

    if public_id.is_empty() {
        None
    } else {
        Some(public_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> ImageHost {
        ImageHost::new(MediaConfig {
            api_base: "https://api.example.test".to_string(),
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
        })
    }

    #[test]
    fn public_id_strips_extension_and_keeps_folder() {
        let url = "https://res.example.com/demo/image/upload/v1712/news/abc123.jpg";
        assert_eq!(public_id_from_url(url), Some("news/abc123".to_string()));
    }

    #[test]
    fn public_id_without_extension_is_kept_whole() {
        let url = "https://res.example.com/demo/image/upload/v1712/news/abc123";
        assert_eq!(public_id_from_url(url), Some("news/abc123".to_string()));
    }

    #[test]
    fn public_id_of_bare_host_is_none() {
        assert_eq!(public_id_from_url("https://res.example.com"), None);
        assert_eq!(public_id_from_url(""), None);
    }

    #[test]
    fn signature_is_order_independent() {
        let host = host();
        let a = host.sign(&[("folder", "news"), ("timestamp", "1700000000")]);
        let b = host.sign(&[("timestamp", "1700000000"), ("folder", "news")]);
        assert_eq!(a, b, "parameter order must not change the signature");
        // SHA-256 hex digest.
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn signature_depends_on_the_secret() {
        let a = host().sign(&[("timestamp", "1700000000")]);
        let other = ImageHost::new(MediaConfig {
            api_base: "https://api.example.test".to_string(),
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "different".to_string(),
        });
        let b = other.sign(&[("timestamp", "1700000000")]);
        assert_ne!(a, b);
    }
}
