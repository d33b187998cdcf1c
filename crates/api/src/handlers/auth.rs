//! Handlers for the `/auth` resource.

use agripress_core::error::CoreError;
use agripress_core::types::DbId;
use agripress_db::repositories::UserRepo;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Maximum accepted login length, matching the column width.
const MAX_LOGIN_LEN: usize = 50;

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 6;

/// The one failure message for every credential problem. Unknown login and
/// wrong password must be indistinguishable to the caller.
const INVALID_CREDENTIALS: &str = "Invalid login or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub name: String,
    pub login: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with login + password. Returns a bearer token with a fixed
/// issuer, audience, and expiry window.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Field constraints.
    if input.login.trim().is_empty() || input.login.len() > MAX_LOGIN_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Login is required and must be at most {MAX_LOGIN_LEN} characters"
        ))));
    }
    if input.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ))));
    }

    // 2. Find an active user by login. An unknown login produces the same
    //    generic rejection as a bad password.
    let user = UserRepo::find_active_by_login(&state.pool, &input.login)
        .await?
        .ok_or_else(|| {
            tracing::warn!(login = %input.login, "Login attempt for unknown or inactive user");
            AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
        })?;

    // 3. Verify the password against the stored Argon2id hash.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::warn!(login = %input.login, "Login attempt with wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    // 4. Issue the token.
    let token = generate_access_token(user.id, &user.name, &user.login, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(login = %user.login, "User authenticated");

    Ok(Json(AuthResponse {
        token,
        expires_in: state.config.jwt.expiry_mins * 60,
        user: UserInfo {
            id: user.id,
            name: user.name,
            login: user.login,
        },
    }))
}
