//! Handlers for the `/categories` resource.

use agripress_core::error::CoreError;
use agripress_core::types::DbId;
use agripress_db::models::category::{Category, CreateCategory, UpdateCategory};
use agripress_db::repositories::{CategoryRepo, NewsRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum accepted category name length, matching the column width.
const MAX_NAME_LEN: usize = 100;

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() || name.len() > MAX_NAME_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Category name is required and must be at most {MAX_NAME_LEN} characters"
        ))));
    }
    Ok(())
}

/// GET /api/v1/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /api/v1/categories/active
pub async fn list_active(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list_active(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(category))
}

/// POST /api/v1/categories
///
/// Rejects with 409 when another category already holds the name
/// (case-insensitively).
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    validate_name(&input.name)?;

    if let Some(existing) = CategoryRepo::find_by_name(&state.pool, &input.name).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A category named '{}' already exists",
            existing.name
        ))));
    }

    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(id = category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    if let Some(name) = &input.name {
        validate_name(name)?;

        // Renaming onto another category's name is a conflict.
        if let Some(existing) = CategoryRepo::find_by_name(&state.pool, name).await? {
            if existing.id != id {
                return Err(AppError::Core(CoreError::Conflict(format!(
                    "Another category named '{}' already exists",
                    existing.name
                ))));
            }
        }
    }

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    tracing::info!(id, "Category updated");
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
///
/// Fails with 409 while news articles still reference the category; the
/// category and its articles are left unchanged.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    let dependents = NewsRepo::count_by_category(&state.pool, id).await?;
    if dependents > 0 {
        return Err(AppError::Core(CoreError::InvalidState(format!(
            "Cannot delete category: {dependents} news article(s) reference it"
        ))));
    }

    CategoryRepo::delete(&state.pool, id).await?;
    tracing::info!(id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
