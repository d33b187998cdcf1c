//! Route definitions for the `/quotes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::quote;
use crate::state::AppState;

/// Routes mounted at `/quotes`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create
/// GET    /latest   -> latest_with_trend
/// GET    /{id}     -> get_by_id
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quote::list).post(quote::create))
        .route("/latest", get(quote::latest_with_trend))
        .route(
            "/{id}",
            get(quote::get_by_id)
                .put(quote::update)
                .delete(quote::delete),
        )
}
