//! Photo gallery entity model and DTOs.

use agripress_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::photo::Photo;

/// `ref_kind` value for galleries attached to a news article.
pub const REF_KIND_NEWS: i16 = 1;

/// `ref_kind` value for galleries attached to a project.
pub const REF_KIND_PROJECT: i16 = 2;

/// A gallery row from the `galleries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Gallery {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Kind of record this gallery belongs to (1 = news, 2 = project).
    pub ref_kind: i16,
    /// Id of the related record of that kind, when linked.
    pub related_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// A gallery row joined with its photo count, for paged listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryListItem {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub ref_kind: i16,
    pub related_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub photo_count: i64,
}

/// A gallery with its photos, loaded explicitly (no lazy navigation).
#[derive(Debug, Clone, Serialize)]
pub struct GalleryWithPhotos {
    #[serde(flatten)]
    pub gallery: Gallery,
    pub photos: Vec<Photo>,
}

/// DTO for creating a gallery.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGallery {
    pub title: String,
    pub description: Option<String>,
    pub ref_kind: i16,
    pub related_id: Option<DbId>,
}

/// DTO for updating a gallery. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGallery {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ref_kind: Option<i16>,
    pub related_id: Option<DbId>,
}
