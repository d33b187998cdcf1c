//! Handlers for the `/projects` resource.

use agripress_core::error::CoreError;
use agripress_core::pagination::{
    clamp_page, clamp_page_size, Page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use agripress_core::types::DbId;
use agripress_db::models::gallery::GalleryWithPhotos;
use agripress_db::models::project::{CreateProject, Project, ProjectWithGallery, UpdateProject};
use agripress_db::repositories::{GalleryRepo, PhotoRepo, ProjectRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// Maximum accepted project title length, matching the column width.
const MAX_TITLE_LEN: usize = 200;

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() || title.len() > MAX_TITLE_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Project title is required and must be at most {MAX_TITLE_LEN} characters"
        ))));
    }
    Ok(())
}

/// Ensure the referenced gallery exists before linking to it.
async fn ensure_gallery(state: &AppState, gallery_id: DbId) -> Result<(), AppError> {
    GalleryRepo::find_by_id(&state.pool, gallery_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::Validation(format!(
            "Gallery {gallery_id} does not exist"
        ))))
}

/// Resolve the linked gallery (and its photos) for a project, when set.
async fn with_gallery(state: &AppState, project: Project) -> AppResult<ProjectWithGallery> {
    let gallery = match project.gallery_id {
        Some(gallery_id) => match GalleryRepo::find_by_id(&state.pool, gallery_id).await? {
            Some(gallery) => {
                let photos = PhotoRepo::list_by_gallery(&state.pool, gallery.id).await?;
                Some(GalleryWithPhotos { gallery, photos })
            }
            None => None,
        },
        None => None,
    };
    Ok(ProjectWithGallery { project, gallery })
}

/// GET /api/v1/projects?page=&page_size=
pub async fn list_paged(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Page<Project>>> {
    let page = clamp_page(params.page);
    let page_size = clamp_page_size(params.page_size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);

    let (items, total_count) = ProjectRepo::list_paged(&state.pool, page, page_size).await?;
    Ok(Json(Page::new(items, total_count, page, page_size)))
}

/// GET /api/v1/projects/active
pub async fn list_active(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_active(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
///
/// The project with its linked gallery and that gallery's photos resolved.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectWithGallery>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(with_gallery(&state, project).await?))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_title(&input.title)?;
    if let Some(gallery_id) = input.gallery_id {
        ensure_gallery(&state, gallery_id).await?;
    }

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(id = project.id, title = %project.title, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(gallery_id) = input.gallery_id {
        ensure_gallery(&state, gallery_id).await?;
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    tracing::info!(id, "Project updated");
    Ok(Json(project))
}

/// PATCH /api/v1/projects/{id}/toggle-active
///
/// Flip the published flag and return the project with its gallery resolved.
pub async fn toggle_active(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectWithGallery>> {
    let project = ProjectRepo::toggle_active(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    tracing::info!(id, is_active = project.is_active, "Project active flag toggled");
    Ok(Json(with_gallery(&state, project).await?))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = ProjectRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    tracing::info!(id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
