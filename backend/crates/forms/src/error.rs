//! Forms Error Types
//!
//! This module provides form-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! The `Display` text of each variant is for logs. Clients only ever see
//! [`FormError::user_message`], which never names the check that tripped.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::ports::RelayError;
use crate::domain::value_objects::SpamReason;

/// Forms-specific result type alias
pub type FormResult<T> = Result<T, FormError>;

/// Forms-specific error variants
#[derive(Debug, Error)]
pub enum FormError {
    /// Path names no known form
    #[error("Unknown form: {0}")]
    UnknownForm(String),

    /// Body is not a JSON object of scalar fields
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Per-form quota or burst limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Token missing, rejected, scored too low, or verifier unreachable in production
    #[error("Captcha verification failed: {0}")]
    CaptchaFailed(String),

    /// Content heuristics or interaction floor rejected the submission
    #[error("Submission rejected: {reason}")]
    ContentRejected { reason: SpamReason },

    /// Required setting (relay endpoint, CAPTCHA secret) is missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Relay unreachable, timed out, or answered non-2xx
    #[error("Relay failure: {0}")]
    RelayFailure(#[source] RelayError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl FormError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            FormError::UnknownForm(_) => StatusCode::NOT_FOUND,
            FormError::MalformedPayload(_)
            | FormError::CaptchaFailed(_)
            | FormError::ContentRejected { .. } => StatusCode::BAD_REQUEST,
            FormError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            FormError::Configuration(_) | FormError::RelayFailure(_) | FormError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormError::UnknownForm(_) => ErrorKind::NotFound,
            FormError::MalformedPayload(_)
            | FormError::CaptchaFailed(_)
            | FormError::ContentRejected { .. } => ErrorKind::BadRequest,
            FormError::RateLimited => ErrorKind::TooManyRequests,
            FormError::Configuration(_) | FormError::RelayFailure(_) | FormError::Unexpected(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Message shown to the submitter
    pub fn user_message(&self) -> &'static str {
        match self {
            FormError::UnknownForm(_) => "Form not found",
            FormError::MalformedPayload(_) => "Invalid submission",
            FormError::RateLimited => "Too many submissions. Please try again later.",
            FormError::CaptchaFailed(_) => "Captcha verification failed. Please try again.",
            FormError::ContentRejected { .. } => "Your submission could not be processed.",
            FormError::Configuration(_) => "Server configuration error",
            FormError::RelayFailure(_) => "Failed to send your message. Please try again later.",
            FormError::Unexpected(_) => "An unexpected error occurred",
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            FormError::Configuration(msg) => {
                tracing::error!(message = %msg, "Forms configuration error");
            }
            FormError::RelayFailure(e) => {
                tracing::error!(error = %e, "Form relay failed");
            }
            FormError::Unexpected(msg) => {
                tracing::error!(message = %msg, "Unexpected forms error");
            }
            FormError::RateLimited => {
                tracing::warn!("Form rate limit exceeded");
            }
            FormError::CaptchaFailed(detail) => {
                tracing::warn!(detail = %detail, "Captcha verification failed");
            }
            FormError::ContentRejected { reason } => {
                tracing::warn!(reason = %reason, "Submission rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Forms error");
            }
        }
    }
}

impl From<RelayError> for FormError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::NotConfigured(_) => FormError::Configuration(err.to_string()),
            RelayError::InvalidBody(_) => FormError::Unexpected(err.to_string()),
            other => FormError::RelayFailure(other),
        }
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        AppError::new(err.kind(), err.user_message()).with_source(err)
    }
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
