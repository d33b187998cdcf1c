//! Route definitions for the `/email` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::email;
use crate::state::AppState;

/// Routes mounted at `/email`.
///
/// ```text
/// POST /send        -> send to one recipient
/// POST /send/batch  -> send to many recipients
/// POST /test?to=    -> canned delivery test
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send", post(email::send))
        .route("/send/batch", post(email::send_batch))
        .route("/test", post(email::send_test))
}
