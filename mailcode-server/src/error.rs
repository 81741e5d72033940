//! Generic result/error resprentation(s).

use crate::models::email_verification::VerificationError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use utoipa::ToSchema;

/// Standard return type out of routes / handlers
pub type AppResult<T> = std::result::Result<T, AppError>;

/// An error returned from a route, rendered as an [ErrorResponse].
///
/// The detail is the message clients see. When no message is given the
/// `canonical_reason` of the status code is used instead.
#[derive(thiserror::Error, Eq, PartialEq, Debug)]
pub struct AppError {
    pub(crate) status: StatusCode,
    pub(crate) detail: String,
}

impl AppError {
    /// New instance of [AppError].
    pub fn new<M: ToString>(status_code: StatusCode, message: Option<M>) -> AppError {
        Self {
            status: status_code,
            detail: message
                .map(|m| m.to_string())
                .or_else(|| Self::canonical_reason_to_string(&status_code))
                .unwrap_or_default(),
        }
    }

    /// The status code of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The message of the response.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    fn canonical_reason_to_string(status_code: &StatusCode) -> Option<String> {
        status_code.canonical_reason().map(|r| r.to_string())
    }
}

/// Error body returned by every failing route.
#[derive(ToSchema, Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// Description of what went wrong
    #[schema(example = "Неверный код")]
    pub error: String,
}

impl From<AppError> for ErrorResponse {
    fn from(e: AppError) -> Self {
        Self { error: e.detail }
    }
}

impl From<AppError> for (StatusCode, Json<ErrorResponse>) {
    fn from(app_error: AppError) -> Self {
        (app_error.status, Json(app_error.into()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_response: (StatusCode, Json<ErrorResponse>) = self.into();
        error_response.into_response()
    }
}

impl From<VerificationError> for AppError {
    fn from(err: VerificationError) -> Self {
        let status = match err {
            VerificationError::EmailMissing
            | VerificationError::EmailOrCodeMissing
            | VerificationError::InvalidCode => StatusCode::BAD_REQUEST,
            VerificationError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self::new(status, Some(err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<VerificationError>() {
            Ok(err) => return Self::from(err),
            Err(e) => e,
        };

        let err = match err.downcast::<JsonRejection>() {
            Ok(err) => return Self::from(err),
            Err(e) => e,
        };

        Self::new(StatusCode::INTERNAL_SERVER_ERROR, Some(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), Some(rejection.body_text()))
    }
}

impl From<Infallible> for AppError {
    fn from(the_impossible: Infallible) -> Self {
        match the_impossible {}
    }
}

// Needed to support thiserror::Error, outputs debug for AppError
impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
/// Parse the app error out of the json body
pub(crate) async fn parse_error(response: Response) -> ErrorResponse {
    let body_bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}
