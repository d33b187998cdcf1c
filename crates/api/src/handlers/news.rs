//! Handlers for the `/news` resource.

use agripress_core::error::CoreError;
use agripress_core::pagination::{
    clamp_page, clamp_page_size, Page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use agripress_core::types::DbId;
use agripress_db::models::news::{CreateNews, News, UpdateNews};
use agripress_db::repositories::{CategoryRepo, NewsRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// Column widths enforced before hitting the store.
const MAX_TITLE_LEN: usize = 200;
const MAX_SUBTITLE_LEN: usize = 300;
const MAX_SOURCE_LEN: usize = 100;
const MAX_IMAGE_URL_LEN: usize = 500;

fn validate_fields(
    title: &str,
    subtitle: &str,
    source: &str,
    body: &str,
    image_url: Option<&str>,
) -> Result<(), AppError> {
    let check = |value: &str, max: usize, field: &str| {
        if value.trim().is_empty() || value.len() > max {
            Err(AppError::Core(CoreError::Validation(format!(
                "{field} is required and must be at most {max} characters"
            ))))
        } else {
            Ok(())
        }
    };
    check(title, MAX_TITLE_LEN, "Title")?;
    check(subtitle, MAX_SUBTITLE_LEN, "Subtitle")?;
    check(source, MAX_SOURCE_LEN, "Source")?;
    if body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Body text is required".into(),
        )));
    }
    if let Some(url) = image_url {
        if url.len() > MAX_IMAGE_URL_LEN {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Image URL must be at most {MAX_IMAGE_URL_LEN} characters"
            ))));
        }
    }
    Ok(())
}

/// Ensure the referenced category exists before insert/update.
async fn ensure_category(state: &AppState, category_id: DbId) -> Result<(), AppError> {
    CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::Validation(format!(
            "Category {category_id} does not exist"
        ))))
}

/// GET /api/v1/news
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<News>>> {
    let news = NewsRepo::list(&state.pool).await?;
    Ok(Json(news))
}

/// GET /api/v1/news/paged?page=&page_size=
///
/// A page past the end returns an empty item list with correct totals.
pub async fn list_paged(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Page<News>>> {
    let page = clamp_page(params.page);
    let page_size = clamp_page_size(params.page_size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);

    let (items, total_count) = NewsRepo::list_paged(&state.pool, page, page_size).await?;
    Ok(Json(Page::new(items, total_count, page, page_size)))
}

/// GET /api/v1/news/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<News>> {
    let news = NewsRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "News", id }))?;
    Ok(Json(news))
}

/// GET /api/v1/news/category/{category_id}
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<Json<Vec<News>>> {
    let news = NewsRepo::list_by_category(&state.pool, category_id).await?;
    Ok(Json(news))
}

/// POST /api/v1/news
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateNews>,
) -> AppResult<(StatusCode, Json<News>)> {
    validate_fields(
        &input.title,
        &input.subtitle,
        &input.source,
        &input.body,
        input.image_url.as_deref(),
    )?;
    ensure_category(&state, input.category_id).await?;

    let news = NewsRepo::create(&state.pool, &input).await?;
    tracing::info!(id = news.id, title = %news.title, "News article created");
    Ok((StatusCode::CREATED, Json(news)))
}

/// PUT /api/v1/news/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNews>,
) -> AppResult<Json<News>> {
    if let Some(category_id) = input.category_id {
        ensure_category(&state, category_id).await?;
    }
    if let Some(url) = &input.image_url {
        if url.len() > MAX_IMAGE_URL_LEN {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Image URL must be at most {MAX_IMAGE_URL_LEN} characters"
            ))));
        }
    }

    let news = NewsRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "News", id }))?;
    tracing::info!(id, "News article updated");
    Ok(Json(news))
}

/// DELETE /api/v1/news/{id}
///
/// Cleans up the hosted image first, best-effort: a host failure is logged
/// and never blocks the row delete.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let news = NewsRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "News", id }))?;

    if let (Some(url), Some(host)) = (&news.image_url, state.image_host.as_ref()) {
        match host.delete_by_url(url).await {
            Ok(true) => {}
            Ok(false) => tracing::warn!(id, url = %url, "Image host did not know the article image"),
            Err(e) => tracing::warn!(id, url = %url, error = %e, "Article image cleanup failed"),
        }
    }

    NewsRepo::delete(&state.pool, id).await?;
    tracing::info!(id, "News article deleted");
    Ok(StatusCode::NO_CONTENT)
}
