//! Handlers for the `/galleries/{gallery_id}/photos` resource.
//!
//! Photos are nested under their gallery. Upload goes through the image
//! host first and only then records the row; reorder and set-primary are
//! single-transaction repository operations.

use agripress_core::error::CoreError;
use agripress_core::types::DbId;
use agripress_db::models::photo::{CreatePhoto, Photo, UpdatePhoto};
use agripress_db::repositories::{GalleryRepo, PhotoRepo};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::image::{require_host, validate_image_file};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Host-side folder for gallery photos.
const GALLERY_FOLDER: &str = "galleries";

/// Maximum accepted caption length, matching the column width.
const MAX_CAPTION_LEN: usize = 300;

async fn ensure_gallery(state: &AppState, gallery_id: DbId) -> Result<(), AppError> {
    GalleryRepo::find_by_id(&state.pool, gallery_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Gallery",
            id: gallery_id,
        }))
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body for `POST .../photos/register`: the image is already hosted and
/// only the row needs creating.
#[derive(Debug, Deserialize)]
pub struct RegisterPhotoRequest {
    pub url: String,
    pub file_name: Option<String>,
    pub caption: Option<String>,
    pub size_bytes: Option<i64>,
    pub sort_order: Option<i32>,
}

/// Query parameters for `DELETE .../photos/{id}`.
#[derive(Debug, Deserialize)]
pub struct DeletePhotoParams {
    /// Also remove the image from the host (default: false).
    #[serde(default)]
    pub remove_remote: bool,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/galleries/{gallery_id}/photos
///
/// The gallery's photos in display order.
pub async fn list(
    State(state): State<AppState>,
    Path(gallery_id): Path<DbId>,
) -> AppResult<Json<Vec<Photo>>> {
    ensure_gallery(&state, gallery_id).await?;
    let photos = PhotoRepo::list_by_gallery(&state.pool, gallery_id).await?;
    Ok(Json(photos))
}

/// GET /api/v1/galleries/{gallery_id}/photos/primary
///
/// The gallery's cover photo. 404 when none is flagged.
pub async fn get_primary(
    State(state): State<AppState>,
    Path(gallery_id): Path<DbId>,
) -> AppResult<Json<Photo>> {
    ensure_gallery(&state, gallery_id).await?;
    let photo = PhotoRepo::find_primary(&state.pool, gallery_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Gallery has no primary photo".into()))?;
    Ok(Json(photo))
}

/// GET /api/v1/galleries/{gallery_id}/photos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((gallery_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Photo>> {
    let photo = PhotoRepo::find_in_gallery(&state.pool, gallery_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Photo", id }))?;
    Ok(Json(photo))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/v1/galleries/{gallery_id}/photos
///
/// Multipart form with a required `file` field and optional `caption` and
/// `sort_order` text fields. The image goes to the host first; the row is
/// only recorded once the host has accepted it.
pub async fn upload(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(gallery_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Photo>)> {
    ensure_gallery(&state, gallery_id).await?;
    let host = require_host(&state)?;

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut caption: Option<String> = None;
    let mut sort_order: Option<i32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let file_name = field.file_name().unwrap_or("photo.jpg").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((file_name, data.to_vec()));
            }
            "caption" => {
                caption = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "sort_order" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                sort_order = Some(text.parse().map_err(|_| {
                    AppError::BadRequest("sort_order must be an integer".into())
                })?);
            }
            _ => {} // ignore unknown fields
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    validate_image_file(&file_name, data.len())?;

    let size = data.len() as i64;
    tracing::info!(gallery_id, file_name = %file_name, size, "Photo upload started");

    let uploaded = host
        .upload(data, &file_name, GALLERY_FOLDER)
        .await
        .map_err(|e| AppError::Core(CoreError::ExternalService(e.to_string())))?;

    let photo = PhotoRepo::create(
        &state.pool,
        &CreatePhoto {
            gallery_id,
            url: uploaded.url,
            file_name: Some(file_name),
            caption,
            size_bytes: Some(size),
            sort_order,
        },
    )
    .await?;

    tracing::info!(gallery_id, photo_id = photo.id, url = %photo.url, "Photo added to gallery");
    Ok((StatusCode::CREATED, Json(photo)))
}

/// POST /api/v1/galleries/{gallery_id}/photos/register
///
/// Record a photo whose image is already hosted (e.g. uploaded via
/// `/images/upload` or reused from another gallery).
pub async fn register(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(gallery_id): Path<DbId>,
    Json(input): Json<RegisterPhotoRequest>,
) -> AppResult<(StatusCode, Json<Photo>)> {
    ensure_gallery(&state, gallery_id).await?;

    if input.url.trim().is_empty() || input.url.len() > 500 {
        return Err(AppError::Core(CoreError::Validation(
            "Photo URL is required and must be at most 500 characters".into(),
        )));
    }

    let photo = PhotoRepo::create(
        &state.pool,
        &CreatePhoto {
            gallery_id,
            url: input.url,
            file_name: input.file_name,
            caption: input.caption,
            size_bytes: input.size_bytes,
            sort_order: input.sort_order,
        },
    )
    .await?;

    tracing::info!(gallery_id, photo_id = photo.id, "Existing image registered in gallery");
    Ok((StatusCode::CREATED, Json(photo)))
}

/// PUT /api/v1/galleries/{gallery_id}/photos/{id}
///
/// Update a photo's caption or position.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((gallery_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdatePhoto>,
) -> AppResult<Json<Photo>> {
    if let Some(caption) = &input.caption {
        if caption.len() > MAX_CAPTION_LEN {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Caption must be at most {MAX_CAPTION_LEN} characters"
            ))));
        }
    }

    let photo = PhotoRepo::update(&state.pool, gallery_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Photo", id }))?;
    tracing::info!(gallery_id, photo_id = id, "Photo updated");
    Ok(Json(photo))
}

/// DELETE /api/v1/galleries/{gallery_id}/photos/{id}?remove_remote=
///
/// Removes the row; with `remove_remote=true` the hosted image is deleted
/// first, best-effort (host failures are logged and never block the row
/// delete).
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((gallery_id, id)): Path<(DbId, DbId)>,
    Query(params): Query<DeletePhotoParams>,
) -> AppResult<StatusCode> {
    let photo = PhotoRepo::find_in_gallery(&state.pool, gallery_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Photo", id }))?;

    if params.remove_remote {
        if let Some(host) = state.image_host.as_ref() {
            match host.delete_by_url(&photo.url).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!(photo_id = id, url = %photo.url,
                        "Image host did not know the photo")
                }
                Err(e) => {
                    tracing::warn!(photo_id = id, url = %photo.url, error = %e,
                        "Photo cleanup on host failed")
                }
            }
        }
    }

    PhotoRepo::delete_in_gallery(&state.pool, gallery_id, id).await?;
    tracing::info!(gallery_id, photo_id = id, "Photo removed from gallery");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/galleries/{gallery_id}/photos/reorder
///
/// Body: `[photo_id, ...]` in the desired order. The i-th listed photo gets
/// position i+1; photos not listed keep their position, ids the gallery
/// does not own are ignored.
pub async fn reorder(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(gallery_id): Path<DbId>,
    Json(ordering): Json<Vec<DbId>>,
) -> AppResult<Json<MessageResponse>> {
    ensure_gallery(&state, gallery_id).await?;

    let updated = PhotoRepo::reorder(&state.pool, gallery_id, &ordering).await?;
    tracing::info!(gallery_id, updated, "Gallery photos reordered");
    Ok(Json(MessageResponse::new(format!(
        "Repositioned {updated} photo(s)"
    ))))
}

/// PUT /api/v1/galleries/{gallery_id}/photos/{id}/set-primary
///
/// Flags the photo as the gallery's cover image, clearing any previous
/// flag in the same transaction.
pub async fn set_primary(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((gallery_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Photo>> {
    ensure_gallery(&state, gallery_id).await?;

    let photo = PhotoRepo::set_primary(&state.pool, gallery_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Photo", id }))?;

    tracing::info!(gallery_id, photo_id = id, "Primary photo set");
    Ok(Json(photo))
}
