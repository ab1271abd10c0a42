//! Error handling module.
//!
//! This module provides unified error handling with proper HTTP status code mapping
//! and standardized API error responses.

pub mod codes;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub use codes::{ErrorCategory, ErrorCode};

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request.
    #[error("{0}")]
    BadRequest(String),

    /// Required query parameters are absent.
    #[error("Missing required parameters: {0}")]
    MissingParam(String),

    /// A parameter is outside its supported range.
    #[error("{0}")]
    InvalidParam(String),

    /// Digit text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Internal server error.
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::BadRequest(_) => ErrorCode::BAD_REQUEST,
            Self::MissingParam(_) => ErrorCode::MISSING_PARAM,
            Self::InvalidParam(_) => ErrorCode::INVALID_PARAM,
            Self::Parse(_) => ErrorCode::INVALID_DIGITS,
            Self::Internal(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::MissingParam(_) | Self::InvalidParam(_) | Self::Parse(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let category = code.category();
        let message = self.to_string();

        // Validation failures are the client's problem; anything else is ours.
        if category == ErrorCategory::Validation {
            tracing::debug!(
                error_code = %code,
                category = %category,
                status = %status,
                message = %message,
                "Request rejected"
            );
        } else {
            let detail = match &self {
                Self::Internal(detail) => detail.as_str(),
                _ => message.as_str(),
            };
            tracing::error!(
                error_code = %code,
                category = %category,
                status = %status,
                detail = %detail,
                "Request failed"
            );
        }

        let body = Json(json!({
            "error": message,
            "code": i32::from(code)
        }));

        (status, body).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Digit parsing error.
///
/// Carries the offending character or token and the base, so callers can
/// report exactly what was wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No digits were supplied.
    #[error("Digits must be a non-empty string")]
    Empty,

    /// Character is not `0-9` or a letter.
    #[error("Invalid character \"{character}\" for base {base}")]
    InvalidCharacter {
        /// The rejected character.
        character: char,
        /// Base being parsed.
        base: u32,
    },

    /// Character maps to a digit value that the base does not have.
    #[error("Digit \"{character}\" (value {value}) is too large for base {base}")]
    DigitTooLarge {
        /// The rejected character.
        character: char,
        /// Its digit value.
        value: u32,
        /// Base being parsed.
        base: u32,
    },

    /// Comma-separated token is not an integer in `[0, base)`.
    #[error("Invalid digit \"{token}\" for base {base}")]
    InvalidToken {
        /// The rejected token, whitespace-trimmed.
        token: String,
        /// Base being parsed.
        base: u32,
    },
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
