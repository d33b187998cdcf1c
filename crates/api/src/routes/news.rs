//! Route definitions for the `/news` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::news;
use crate::state::AppState;

/// Routes mounted at `/news`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /paged?page=&page_size=    -> list_paged
/// GET    /category/{category_id}    -> list_by_category
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete (best-effort image cleanup)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(news::list).post(news::create))
        .route("/paged", get(news::list_paged))
        .route("/category/{category_id}", get(news::list_by_category))
        .route(
            "/{id}",
            get(news::get_by_id).put(news::update).delete(news::delete),
        )
}
