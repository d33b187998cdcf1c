//! Route definitions for the `/galleries` resource.
//!
//! Also nests gallery-scoped photo routes under
//! `/galleries/{gallery_id}/photos`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{gallery, photo};
use crate::routes::MAX_UPLOAD_BODY_BYTES;
use crate::state::AppState;

/// Routes mounted at `/galleries`.
///
/// ```text
/// GET    /                                   -> list_paged
/// POST   /                                   -> create
/// GET    /by-reference/{ref_kind}            -> list_by_reference
/// GET    /{id}                               -> get_by_id (photos included)
/// PUT    /{id}                               -> update
/// DELETE /{id}                               -> delete (cascades photos)
///
/// GET    /{gallery_id}/photos                -> list
/// POST   /{gallery_id}/photos                -> upload (multipart)
/// POST   /{gallery_id}/photos/register       -> register hosted image
/// GET    /{gallery_id}/photos/primary        -> get_primary
/// PUT    /{gallery_id}/photos/reorder        -> reorder
/// GET    /{gallery_id}/photos/{id}           -> get_by_id
/// PUT    /{gallery_id}/photos/{id}           -> update
/// DELETE /{gallery_id}/photos/{id}           -> delete (?remove_remote=)
/// PUT    /{gallery_id}/photos/{id}/set-primary -> set_primary
/// ```
pub fn router() -> Router<AppState> {
    let photo_routes = Router::new()
        .route("/", get(photo::list).post(photo::upload))
        .route("/register", post(photo::register))
        .route("/primary", get(photo::get_primary))
        .route("/reorder", put(photo::reorder))
        .route(
            "/{id}",
            get(photo::get_by_id)
                .put(photo::update)
                .delete(photo::delete),
        )
        .route("/{id}/set-primary", put(photo::set_primary))
        // Multipart uploads exceed the default body limit.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES));

    Router::new()
        .route("/", get(gallery::list_paged).post(gallery::create))
        .route("/by-reference/{ref_kind}", get(gallery::list_by_reference))
        .route(
            "/{id}",
            get(gallery::get_by_id)
                .put(gallery::update)
                .delete(gallery::delete),
        )
        .nest("/{gallery_id}/photos", photo_routes)
}
