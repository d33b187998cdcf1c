//! Client for the third-party image-hosting HTTP API.
//!
//! Uploads return a permanent public URL; deletion works backwards from that
//! URL. The host is the only place image bytes live -- the database stores
//! URLs and metadata only.

mod client;
mod config;

pub use client::{ImageHost, MediaError, UploadedImage};
pub use config::{MediaConfig, DEFAULT_FOLDER};
