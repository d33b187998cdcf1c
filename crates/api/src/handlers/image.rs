//! Handlers for the `/images` resource: direct image-host operations that
//! are not tied to a gallery row (article header images, ad-hoc uploads).

use agripress_core::error::CoreError;
use agripress_core::types::Timestamp;
use agripress_media::{ImageHost, DEFAULT_FOLDER};
use axum::extract::{Multipart, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Accepted image file extensions.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Maximum accepted image size in bytes (50 MB).
pub const MAX_IMAGE_BYTES: usize = 50 * 1024 * 1024;

/// Resolve the host client or refuse with a typed failure.
pub fn require_host(state: &AppState) -> Result<&ImageHost, AppError> {
    state
        .image_host
        .as_ref()
        .as_ref()
        .ok_or_else(|| {
            AppError::Core(CoreError::ExternalService(
                "Image hosting is not configured".into(),
            ))
        })
}

/// Reject files the host should never see: wrong extension or oversized.
pub fn validate_image_file(file_name: &str, len: usize) -> Result<(), AppError> {
    let ext = file_name.rsplit('.').next().unwrap_or("").to_lowercase();
    if !ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported image format '.{ext}'. Use: jpg, jpeg, png, gif or webp"
        )));
    }
    if len == 0 {
        return Err(AppError::BadRequest("The uploaded file is empty".into()));
    }
    if len > MAX_IMAGE_BYTES {
        return Err(AppError::BadRequest(
            "File too large. Maximum size: 50MB".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response body for a single successful upload.
#[derive(Debug, Serialize)]
pub struct ImageUploadResponse {
    pub url: String,
    pub file_name: String,
    pub size_bytes: i64,
    pub uploaded_at: Timestamp,
}

/// Per-file outcome of a batch upload. One failing file never aborts the
/// others.
#[derive(Debug, Serialize)]
pub struct BatchUploadResult {
    pub file_name: String,
    pub url: Option<String>,
    pub error: Option<String>,
}

/// Query parameters for `DELETE /images`.
#[derive(Debug, Deserialize)]
pub struct DeleteImageParams {
    pub url: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/images/upload
///
/// Multipart form with a required `file` field and an optional `folder`
/// text field selecting the host-side folder.
pub async fn upload(
    State(state): State<AppState>,
    _user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<ImageUploadResponse>> {
    let host = require_host(&state)?;

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut folder = DEFAULT_FOLDER.to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let file_name = field.file_name().unwrap_or("image.jpg").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((file_name, data.to_vec()));
            }
            "folder" => {
                folder = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            _ => {} // ignore unknown fields
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    validate_image_file(&file_name, data.len())?;

    tracing::info!(file_name = %file_name, size = data.len(), folder = %folder,
        "Image upload started");

    let uploaded = host
        .upload(data, &file_name, &folder)
        .await
        .map_err(|e| AppError::Core(CoreError::ExternalService(e.to_string())))?;

    Ok(Json(ImageUploadResponse {
        url: uploaded.url,
        file_name,
        size_bytes: uploaded.size_bytes,
        uploaded_at: chrono::Utc::now(),
    }))
}

/// POST /api/v1/images/upload/batch
///
/// Multipart form with any number of `files` fields. Each file is uploaded
/// independently; failures are reported per file.
pub async fn upload_batch(
    State(state): State<AppState>,
    _user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<Vec<BatchUploadResult>>> {
    let host = require_host(&state)?;

    let mut folder = DEFAULT_FOLDER.to_string();
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name().unwrap_or("") {
            "files" | "file" => {
                let file_name = field.file_name().unwrap_or("image.jpg").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                files.push((file_name, data.to_vec()));
            }
            "folder" => {
                folder = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(AppError::BadRequest("No files provided".into()));
    }

    let mut results = Vec::with_capacity(files.len());
    for (file_name, data) in files {
        if let Err(e) = validate_image_file(&file_name, data.len()) {
            results.push(BatchUploadResult {
                file_name,
                url: None,
                error: Some(e.to_string()),
            });
            continue;
        }

        match host.upload(data, &file_name, &folder).await {
            Ok(uploaded) => results.push(BatchUploadResult {
                file_name,
                url: Some(uploaded.url),
                error: None,
            }),
            Err(e) => {
                tracing::warn!(file_name = %file_name, error = %e, "Batch upload item failed");
                results.push(BatchUploadResult {
                    file_name,
                    url: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    Ok(Json(results))
}

/// DELETE /api/v1/images?url=
///
/// Remove a hosted image by URL. 400 when the host reports it could not
/// delete (unknown URL, already gone).
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<DeleteImageParams>,
) -> AppResult<Json<MessageResponse>> {
    let host = require_host(&state)?;

    let url = params
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("Image URL not provided".into()))?;

    let deleted = host
        .delete_by_url(&url)
        .await
        .map_err(|e| AppError::Core(CoreError::ExternalService(e.to_string())))?;

    if deleted {
        Ok(Json(MessageResponse::new("Image deleted")))
    } else {
        Err(AppError::BadRequest(
            "The image host could not delete this image".into(),
        ))
    }
}
