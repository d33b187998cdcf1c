//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `agripress_db` and
//! map errors via [`crate::error::AppError`].

pub mod auth;
pub mod category;
pub mod email;
pub mod gallery;
pub mod image;
pub mod news;
pub mod photo;
pub mod project;
pub mod quote;
