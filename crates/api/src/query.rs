//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use agripress_core::types::DbId;
use serde::Deserialize;

/// Generic pagination parameters (`?page=&page_size=`).
///
/// Used by any handler that supports paginated listing. Values are clamped
/// via `agripress_core::pagination::{clamp_page, clamp_page_size}`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Query parameter narrowing a reference-scoped gallery listing to one
/// related record (`?related_id=`).
#[derive(Debug, Deserialize)]
pub struct RelatedIdParam {
    pub related_id: Option<DbId>,
}
