//! News article entity model and DTOs.

use agripress_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A news row from the `news` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct News {
    pub id: DbId,
    pub title: String,
    pub subtitle: String,
    pub category_id: DbId,
    pub published_at: Timestamp,
    pub source: String,
    pub body: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// DTO for creating a news article.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNews {
    pub title: String,
    pub subtitle: String,
    pub category_id: DbId,
    pub published_at: Timestamp,
    pub source: String,
    pub body: String,
    pub image_url: Option<String>,
}

/// DTO for updating a news article. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub category_id: Option<DbId>,
    pub published_at: Option<Timestamp>,
    pub source: Option<String>,
    pub body: Option<String>,
    pub image_url: Option<String>,
}
