//! Route definitions for the `/projects` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                       -> list_paged
/// POST   /                       -> create
/// GET    /active                 -> list_active
/// GET    /{id}                   -> get_by_id (gallery resolved)
/// PUT    /{id}                   -> update
/// DELETE /{id}                   -> delete
/// PATCH  /{id}/toggle-active     -> toggle_active
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list_paged).post(project::create))
        .route("/active", get(project::list_active))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/toggle-active", patch(project::toggle_active))
}
