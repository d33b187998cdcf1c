//! Gallery photo entity model and DTOs.

use agripress_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A photo row from the `photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub gallery_id: DbId,
    pub url: String,
    pub file_name: Option<String>,
    pub caption: Option<String>,
    pub size_bytes: Option<i64>,
    /// Explicit position within the gallery; unset photos sort after
    /// ordered ones, newest upload first.
    pub sort_order: Option<i32>,
    pub is_primary: bool,
    pub uploaded_at: Timestamp,
}

/// DTO for inserting a photo row (the image itself is already hosted).
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePhoto {
    pub gallery_id: DbId,
    pub url: String,
    pub file_name: Option<String>,
    pub caption: Option<String>,
    pub size_bytes: Option<i64>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a photo's caption or position.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePhoto {
    pub caption: Option<String>,
    pub sort_order: Option<i32>,
}
