pub mod auth;
pub mod category;
pub mod email;
pub mod gallery;
pub mod health;
pub mod image;
pub mod news;
pub mod project;
pub mod quote;

use axum::Router;

use crate::state::AppState;

/// Body limit for multipart image uploads (100 MB; individual files are
/// capped at 50 MB by the handlers).
pub(crate) const MAX_UPLOAD_BODY_BYTES: usize = 100 * 1024 * 1024;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
///
/// /categories                                      list, create
/// /categories/active                               active categories
/// /categories/{id}                                 get, update, delete
///
/// /news                                            list, create
/// /news/paged                                      paged listing
/// /news/category/{category_id}                     articles in a category
/// /news/{id}                                       get, update, delete
///
/// /quotes                                          list, create
/// /quotes/latest                                   latest sample with trends
/// /quotes/{id}                                     get, update, delete
///
/// /galleries                                       paged list, create
/// /galleries/by-reference/{ref_kind}               galleries per record kind
/// /galleries/{id}                                  get (with photos), update, delete
/// /galleries/{gallery_id}/photos                   list, upload (multipart)
/// /galleries/{gallery_id}/photos/register          register hosted image
/// /galleries/{gallery_id}/photos/primary           cover photo
/// /galleries/{gallery_id}/photos/reorder           reorder (PUT)
/// /galleries/{gallery_id}/photos/{id}              get, update, delete
/// /galleries/{gallery_id}/photos/{id}/set-primary  set cover photo (PUT)
///
/// /projects                                        paged list, create
/// /projects/active                                 published projects
/// /projects/{id}                                   get, update, delete
/// /projects/{id}/toggle-active                     flip published flag (PATCH)
///
/// /images/upload                                   direct host upload (multipart)
/// /images/upload/batch                             best-effort multi-upload
/// /images?url=                                     delete hosted image
///
/// /email/send                                      send to one recipient
/// /email/send/batch                                send to many recipients
/// /email/test?to=                                  canned delivery test
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication.
        .nest("/auth", auth::router())
        // News taxonomy and articles.
        .nest("/categories", category::router())
        .nest("/news", news::router())
        // Commodity quote series.
        .nest("/quotes", quote::router())
        // Galleries (also nests gallery-scoped photos).
        .nest("/galleries", gallery::router())
        // Institutional projects.
        .nest("/projects", project::router())
        // Direct image-host operations.
        .nest("/images", image::router())
        // Outbound email.
        .nest("/email", email::router())
}
