/// Default API base of the image host (Cloudinary-compatible).
const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";

/// Default upload folder when the caller does not pick one.
pub const DEFAULT_FOLDER: &str = "news";

/// Configuration for the image-hosting account.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// API base URL (defaults to the hosted service).
    pub api_base: String,
    /// Account identifier, part of every endpoint path.
    pub cloud_name: String,
    /// API key sent with every signed request.
    pub api_key: String,
    /// API secret used to sign requests; never leaves the process.
    pub api_secret: String,
}

impl MediaConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `MEDIA_CLOUD_NAME` is not set, signalling that
    /// image hosting is not configured and upload endpoints should refuse.
    ///
    /// | Variable           | Required | Default                      |
    /// |--------------------|----------|------------------------------|
    /// | `MEDIA_CLOUD_NAME` | yes      | --                           |
    /// | `MEDIA_API_KEY`    | yes      | --                           |
    /// | `MEDIA_API_SECRET` | yes      | --                           |
    /// | `MEDIA_API_BASE`   | no       | `https://api.cloudinary.com` |
    pub fn from_env() -> Option<Self> {
        let cloud_name = std::env::var("MEDIA_CLOUD_NAME").ok()?;
        let api_key = std::env::var("MEDIA_API_KEY").ok()?;
        let api_secret = std::env::var("MEDIA_API_SECRET").ok()?;
        Some(Self {
            api_base: std::env::var("MEDIA_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            cloud_name,
            api_key,
            api_secret,
        })
    }
}
