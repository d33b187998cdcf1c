//! User entity model and DTOs.

use agripress_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row from the `users` table.
///
/// `password_hash` is a PHC-formatted Argon2id string and is never
/// serialized into API responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting a user (the password is hashed by the caller).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub login: String,
    pub password_hash: String,
    /// Defaults to true if omitted.
    pub is_active: Option<bool>,
}
