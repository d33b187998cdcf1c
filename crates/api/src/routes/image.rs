//! Route definitions for the `/images` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::image;
use crate::routes::MAX_UPLOAD_BODY_BYTES;
use crate::state::AppState;

/// Routes mounted at `/images`.
///
/// ```text
/// POST   /upload        -> upload (multipart)
/// POST   /upload/batch  -> upload_batch (best-effort per file)
/// DELETE /?url=         -> delete hosted image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(image::upload))
        .route("/upload/batch", post(image::upload_batch))
        .route("/", delete(image::delete))
        // Multipart uploads exceed the default body limit.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES))
}
