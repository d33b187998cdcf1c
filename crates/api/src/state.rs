use std::sync::Arc;

use agripress_mailer::Mailer;
use agripress_media::ImageHost;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: agripress_db::DbPool,
    /// Server configuration, constructed once at startup.
    pub config: Arc<ServerConfig>,
    /// Image-hosting client; `None` when the host account is not configured.
    pub image_host: Arc<Option<ImageHost>>,
    /// SMTP mailer; `None` when SMTP is not configured.
    pub mailer: Arc<Option<Mailer>>,
}
