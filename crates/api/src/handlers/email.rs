//! Handlers for the `/email` resource.

use agripress_core::error::CoreError;
use agripress_mailer::{is_valid_address, EmailError, Mailer};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn default_is_html() -> bool {
    true
}

/// Resolve the mailer or refuse with a typed failure.
fn require_mailer(state: &AppState) -> Result<&Mailer, AppError> {
    state.mailer.as_ref().as_ref().ok_or_else(|| {
        AppError::Core(CoreError::ExternalService(
            "Email delivery is not configured".into(),
        ))
    })
}

fn map_email_error(e: EmailError) -> AppError {
    match e {
        EmailError::Address(_) | EmailError::NoRecipients => {
            AppError::Core(CoreError::Validation(e.to_string()))
        }
        other => AppError::Core(CoreError::ExternalService(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /email/send`.
#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
    #[serde(default = "default_is_html")]
    pub is_html: bool,
}

/// Request body for `POST /email/send/batch`.
#[derive(Debug, Deserialize)]
pub struct SendBatchEmailRequest {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    #[serde(default = "default_is_html")]
    pub is_html: bool,
}

/// Query parameters for `POST /email/test`.
#[derive(Debug, Deserialize)]
pub struct TestEmailParams {
    pub to: Option<String>,
}

/// Delivery acknowledgement.
#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub message: String,
    pub recipients: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/email/send
pub async fn send(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<SendEmailRequest>,
) -> AppResult<Json<SendEmailResponse>> {
    let mailer = require_mailer(&state)?;

    if !is_valid_address(&input.to) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid recipient address: {}",
            input.to
        ))));
    }

    tracing::info!(to = %input.to, subject = %input.subject, "Email send requested");

    mailer
        .send(
            std::slice::from_ref(&input.to),
            &input.subject,
            &input.body,
            input.is_html,
        )
        .await
        .map_err(map_email_error)?;

    Ok(Json(SendEmailResponse {
        message: "Email sent".into(),
        recipients: 1,
    }))
}

/// POST /api/v1/email/send/batch
///
/// Every recipient address is validated before any delivery attempt; one
/// bad entry rejects the whole request with the offending addresses listed.
pub async fn send_batch(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<SendBatchEmailRequest>,
) -> AppResult<Json<SendEmailResponse>> {
    let mailer = require_mailer(&state)?;

    if input.to.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Recipient list is empty".into(),
        )));
    }

    let invalid: Vec<&str> = input
        .to
        .iter()
        .filter(|a| !is_valid_address(a))
        .map(String::as_str)
        .collect();
    if !invalid.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid recipient address(es): {}",
            invalid.join(", ")
        ))));
    }

    tracing::info!(recipients = input.to.len(), subject = %input.subject,
        "Batch email send requested");

    mailer
        .send(&input.to, &input.subject, &input.body, input.is_html)
        .await
        .map_err(map_email_error)?;

    Ok(Json(SendEmailResponse {
        message: "Email sent".into(),
        recipients: input.to.len(),
    }))
}

/// POST /api/v1/email/test?to=
///
/// Sends a canned HTML message so operators can verify SMTP credentials.
pub async fn send_test(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<TestEmailParams>,
) -> AppResult<Json<SendEmailResponse>> {
    let mailer = require_mailer(&state)?;

    let to = params
        .to
        .filter(|a| is_valid_address(a))
        .ok_or_else(|| AppError::Core(CoreError::Validation("Invalid email address".into())))?;

    let body = "<h2>Delivery test</h2>\
                <p>If you are reading this, outbound email is configured correctly.</p>";

    mailer
        .send(&[to.clone()], "Delivery test", body, true)
        .await
        .map_err(map_email_error)?;

    tracing::info!(to = %to, "Test email sent");
    Ok(Json(SendEmailResponse {
        message: "Test email sent".into(),
        recipients: 1,
    }))
}
