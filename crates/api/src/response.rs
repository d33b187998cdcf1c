//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Simple `{ "message": ... }` acknowledgement for operations whose only
/// useful result is that they happened (deletes, reorders, email sends).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
