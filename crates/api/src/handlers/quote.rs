//! Handlers for the `/quotes` resource.

use agripress_core::error::CoreError;
use agripress_core::types::DbId;
use agripress_db::models::quote::{CreateQuote, Quote, QuoteWithTrend, UpdateQuote};
use agripress_db::repositories::QuoteRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn validate_values(soy: Decimal, rice: Decimal, corn: Decimal) -> Result<(), AppError> {
    for (value, name) in [(soy, "soy"), (rice, "rice"), (corn, "corn")] {
        if value.is_sign_negative() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "The {name} price cannot be negative"
            ))));
        }
    }
    Ok(())
}

/// GET /api/v1/quotes
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Quote>>> {
    let quotes = QuoteRepo::list(&state.pool).await?;
    Ok(Json(quotes))
}

/// GET /api/v1/quotes/latest
///
/// The most recent sample with per-commodity trends against the sample
/// before it. 404 while the series is empty; with a single sample every
/// trend is `stable`.
pub async fn latest_with_trend(
    State(state): State<AppState>,
) -> AppResult<Json<QuoteWithTrend>> {
    let mut samples = QuoteRepo::most_recent(&state.pool, 2).await?.into_iter();

    let latest = samples
        .next()
        .ok_or_else(|| AppError::NotFound("No quotes recorded yet".into()))?;
    let previous = samples.next();

    Ok(Json(QuoteWithTrend::from_samples(latest, previous.as_ref())))
}

/// GET /api/v1/quotes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Quote>> {
    let quote = QuoteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Quote", id }))?;
    Ok(Json(quote))
}

/// POST /api/v1/quotes
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateQuote>,
) -> AppResult<(StatusCode, Json<Quote>)> {
    validate_values(input.soy, input.rice, input.corn)?;

    let quote = QuoteRepo::create(&state.pool, &input).await?;
    tracing::info!(id = quote.id, soy = %quote.soy, rice = %quote.rice, corn = %quote.corn,
        "Quote recorded");
    Ok((StatusCode::CREATED, Json(quote)))
}

/// PUT /api/v1/quotes/{id}
///
/// Full-value correction of an existing sample; the recording timestamp is
/// left untouched.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuote>,
) -> AppResult<Json<Quote>> {
    validate_values(input.soy, input.rice, input.corn)?;

    let quote = QuoteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Quote", id }))?;
    tracing::info!(id, "Quote updated");
    Ok(Json(quote))
}

/// DELETE /api/v1/quotes/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = QuoteRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound { entity: "Quote", id }));
    }
    tracing::info!(id, "Quote deleted");
    Ok(StatusCode::NO_CONTENT)
}
