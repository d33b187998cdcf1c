//! First-run seeding of the administrator account.

use agripress_db::models::user::CreateUser;
use agripress_db::repositories::UserRepo;
use agripress_db::DbPool;

use crate::auth::password::hash_password;

/// Errors from the startup seeder.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Create the initial administrator when the users table is empty.
///
/// Login and password come from `ADMIN_LOGIN` / `ADMIN_PASSWORD`. Without
/// `ADMIN_PASSWORD` no account is created and a warning is logged -- the
/// instance then has no way to authenticate until a user is seeded manually.
pub async fn ensure_admin_user(pool: &DbPool) -> Result<(), SeedError> {
    if UserRepo::count(pool).await? > 0 {
        return Ok(());
    }

    let Ok(password) = std::env::var("ADMIN_PASSWORD") else {
        tracing::warn!("No users exist and ADMIN_PASSWORD is not set; skipping admin seed");
        return Ok(());
    };
    let login = std::env::var("ADMIN_LOGIN").unwrap_or_else(|_| "admin".into());

    let password_hash = hash_password(&password).map_err(SeedError::Hash)?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: "Administrator".into(),
            login,
            password_hash,
            is_active: None,
        },
    )
    .await?;

    tracing::info!(login = %user.login, "Initial administrator created");
    Ok(())
}
