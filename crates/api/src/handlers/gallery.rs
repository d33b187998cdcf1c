//! Handlers for the `/galleries` resource.

use agripress_core::error::CoreError;
use agripress_core::pagination::{
    clamp_page, clamp_page_size, Page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use agripress_core::types::DbId;
use agripress_db::models::gallery::{
    CreateGallery, Gallery, GalleryListItem, GalleryWithPhotos, UpdateGallery, REF_KIND_NEWS,
    REF_KIND_PROJECT,
};
use agripress_db::repositories::{GalleryRepo, PhotoRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{PaginationParams, RelatedIdParam};
use crate::state::AppState;

/// Maximum accepted gallery title length, matching the column width.
const MAX_TITLE_LEN: usize = 200;

fn validate_gallery(title: &str, ref_kind: i16) -> Result<(), AppError> {
    if title.trim().is_empty() || title.len() > MAX_TITLE_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Gallery title is required and must be at most {MAX_TITLE_LEN} characters"
        ))));
    }
    if ref_kind != REF_KIND_NEWS && ref_kind != REF_KIND_PROJECT {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown reference kind {ref_kind} (1 = news, 2 = project)"
        ))));
    }
    Ok(())
}

/// Fetch a gallery's photos and assemble the combined shape.
async fn with_photos(state: &AppState, gallery: Gallery) -> AppResult<GalleryWithPhotos> {
    let photos = PhotoRepo::list_by_gallery(&state.pool, gallery.id).await?;
    Ok(GalleryWithPhotos { gallery, photos })
}

/// GET /api/v1/galleries?page=&page_size=
///
/// Paged listing with photo counts, newest gallery first.
pub async fn list_paged(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Page<GalleryListItem>>> {
    let page = clamp_page(params.page);
    let page_size = clamp_page_size(params.page_size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);

    let (items, total_count) = GalleryRepo::list_paged(&state.pool, page, page_size).await?;
    Ok(Json(Page::new(items, total_count, page, page_size)))
}

/// GET /api/v1/galleries/{id}
///
/// The gallery with its photos in display order.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<GalleryWithPhotos>> {
    let gallery = GalleryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Gallery",
            id,
        }))?;
    Ok(Json(with_photos(&state, gallery).await?))
}

/// GET /api/v1/galleries/by-reference/{ref_kind}?related_id=
///
/// Galleries attached to one kind of record (1 = news, 2 = project),
/// optionally narrowed to a single related record, photos included.
pub async fn list_by_reference(
    State(state): State<AppState>,
    Path(ref_kind): Path<i16>,
    Query(params): Query<RelatedIdParam>,
) -> AppResult<Json<Vec<GalleryWithPhotos>>> {
    let galleries =
        GalleryRepo::list_by_reference(&state.pool, ref_kind, params.related_id).await?;

    let mut result = Vec::with_capacity(galleries.len());
    for gallery in galleries {
        result.push(with_photos(&state, gallery).await?);
    }
    Ok(Json(result))
}

/// POST /api/v1/galleries
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateGallery>,
) -> AppResult<(StatusCode, Json<Gallery>)> {
    validate_gallery(&input.title, input.ref_kind)?;

    let gallery = GalleryRepo::create(&state.pool, &input).await?;
    tracing::info!(id = gallery.id, title = %gallery.title, "Gallery created");
    Ok((StatusCode::CREATED, Json(gallery)))
}

/// PUT /api/v1/galleries/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGallery>,
) -> AppResult<Json<Gallery>> {
    if let Some(ref_kind) = input.ref_kind {
        if ref_kind != REF_KIND_NEWS && ref_kind != REF_KIND_PROJECT {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown reference kind {ref_kind} (1 = news, 2 = project)"
            ))));
        }
    }
    if let Some(title) = &input.title {
        if title.trim().is_empty() || title.len() > MAX_TITLE_LEN {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Gallery title must be at most {MAX_TITLE_LEN} characters"
            ))));
        }
    }

    let gallery = GalleryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Gallery",
            id,
        }))?;
    tracing::info!(id, "Gallery updated");
    Ok(Json(gallery))
}

/// DELETE /api/v1/galleries/{id}
///
/// Photos cascade at the store level. Their hosted images are cleaned up
/// first, best-effort: host failures are logged and never block the delete.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    GalleryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Gallery",
            id,
        }))?;

    if let Some(host) = state.image_host.as_ref() {
        let photos = PhotoRepo::list_by_gallery(&state.pool, id).await?;
        for photo in &photos {
            match host.delete_by_url(&photo.url).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!(gallery_id = id, url = %photo.url,
                        "Image host did not know a gallery photo")
                }
                Err(e) => {
                    tracing::warn!(gallery_id = id, url = %photo.url, error = %e,
                        "Gallery photo cleanup failed")
                }
            }
        }
    }

    GalleryRepo::delete(&state.pool, id).await?;
    tracing::info!(id, "Gallery deleted");
    Ok(StatusCode::NO_CONTENT)
}
