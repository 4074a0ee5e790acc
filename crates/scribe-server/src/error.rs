//! HTTP error types for the Scribe server.
//!
//! Maps domain errors from `scribe-core` into appropriate HTTP responses.
//! Every error variant produces a JSON body with a machine-readable `error`
//! field and a human-readable `message`. Mutating content/build routes do
//! not use these mappings for IO failures — those are masked to
//! `{"success": false}` at the handler (the real error is logged).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use scribe_core::error::{ContentError, CredentialError, PasswordError};

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Missing, unknown, or expired session on a protected route.
    Unauthenticated(String),
    /// The request `Origin` is not in the allow-list.
    OriginRejected,
    /// Requested file or path not found.
    NotFound(String),
    /// Client sent invalid input.
    BadRequest(String),
    /// Internal server error. The message never carries storage detail.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, "unauthenticated", msg),
            Self::OriginRejected => (
                StatusCode::FORBIDDEN,
                "origin_rejected",
                "origin is not allowed to access this API".to_owned(),
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::NotFound { .. } => Self::NotFound(err.to_string()),
            ContentError::NotADirectory { .. } => Self::BadRequest(err.to_string()),
            ContentError::Io { .. } => Self::Internal("filesystem error".to_owned()),
        }
    }
}

impl From<CredentialError> for AppError {
    fn from(_: CredentialError) -> Self {
        Self::Internal("credential storage error".to_owned())
    }
}

impl From<PasswordError> for AppError {
    fn from(_: PasswordError) -> Self {
        Self::Internal("password verification error".to_owned())
    }
}
