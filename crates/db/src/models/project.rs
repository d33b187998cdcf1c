//! Project entity model and DTOs.

use agripress_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::gallery::GalleryWithPhotos;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Optional linked photo gallery; nulled when the gallery is deleted.
    pub gallery_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// A project with its linked gallery (and that gallery's photos) resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithGallery {
    #[serde(flatten)]
    pub project: Project,
    pub gallery: Option<GalleryWithPhotos>,
}

/// DTO for creating a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub gallery_id: Option<DbId>,
    /// Defaults to true if omitted.
    pub is_active: Option<bool>,
}

/// DTO for updating a project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub gallery_id: Option<DbId>,
    pub is_active: Option<bool>,
}
