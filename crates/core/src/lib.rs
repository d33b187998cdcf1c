//! Domain logic shared across the agripress backend.
//!
//! This crate has no internal dependencies so the repository layer, the API
//! surface, and any future CLI tooling can all use it.

pub mod error;
pub mod pagination;
pub mod trend;
pub mod types;
