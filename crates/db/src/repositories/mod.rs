//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod gallery_repo;
pub mod news_repo;
pub mod photo_repo;
pub mod project_repo;
pub mod quote_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use gallery_repo::GalleryRepo;
pub use news_repo::NewsRepo;
pub use photo_repo::PhotoRepo;
pub use project_repo::ProjectRepo;
pub use quote_repo::QuoteRepo;
pub use user_repo::UserRepo;
