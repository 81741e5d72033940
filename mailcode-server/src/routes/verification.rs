//! Email verification code routes

use crate::{
    app_state::AppState,
    error::{AppError, AppResult},
    extract::json::Json,
    models::email_verification::{VerificationEmail, VerificationError},
    setups::{ServerSetup, VerificationCodeSender},
};
use axum::{self, extract::State, http::StatusCode};
use mailcode_core::common::{
    CodeVerifyRequest, EmailVerifyRequest, MessageResponse, SendCodeResponse,
};

/// Message returned once a code was issued and mailed.
pub const CODE_SENT: &str = "Код отправлен";
/// Message returned once a code was verified.
pub const CODE_VERIFIED: &str = "Код подтвержден";

/// POST handler for issuing a verification code and mailing it.
///
/// The code is stored before it is mailed. If delivery fails the stored
/// code stays valid.
#[utoipa::path(
    post,
    path = "/send_verification_email",
    request_body = EmailVerifyRequest,
    responses(
        (status = 200, description = "Code issued and sent", body = SendCodeResponse),
        (status = 400, description = "Email missing", body = ErrorResponse),
        (status = 500, description = "Email couldn't be delivered", body = ErrorResponse),
    )
)]
pub async fn send_verification_email<S: ServerSetup>(
    State(state): State<AppState<S>>,
    Json(request): Json<EmailVerifyRequest>,
) -> AppResult<(StatusCode, Json<SendCodeResponse>)> {
    let email = request.email().ok_or(VerificationError::EmailMissing)?;

    let code = state.registry.issue_code(email);

    state
        .verification_code_sender
        .send_code(&VerificationEmail::new(email, &code))
        .await
        .map_err(|err| {
            tracing::warn!(email, error = %err, "Failed to deliver verification email");
            AppError::from(VerificationError::Transport(err))
        })?;

    Ok((
        StatusCode::OK,
        Json(SendCodeResponse {
            message: CODE_SENT.to_string(),
            code: state.echo_code.then_some(code),
        }),
    ))
}

/// POST handler for checking a verification code.
///
/// A matching code is consumed. A wrong code leaves the pending one valid.
#[utoipa::path(
    post,
    path = "/verify_code",
    request_body = CodeVerifyRequest,
    responses(
        (status = 200, description = "Code verified", body = MessageResponse),
        (status = 400, description = "Fields missing or code invalid", body = ErrorResponse),
    )
)]
pub async fn verify_code<S: ServerSetup>(
    State(state): State<AppState<S>>,
    Json(request): Json<CodeVerifyRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let (email, code) = request
        .email_and_code()
        .ok_or(VerificationError::EmailOrCodeMissing)?;
    let code = code.as_str().ok_or(VerificationError::InvalidCode)?;

    state.registry.verify_code(email, code)?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: CODE_VERIFIED.to_string(),
        }),
    ))
}
