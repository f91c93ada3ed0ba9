//! Access Error Types
//!
//! This module provides guard-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::role::Role;

/// Access-specific result type alias
pub type AccessResult<T> = Result<T, AccessError>;

/// Access-specific error variants
///
/// Display strings double as the wire-level `error` field, so the
/// credential failures both read "Unauthorized" as the clients expect;
/// logging distinguishes the variants.
#[derive(Debug, Error)]
pub enum AccessError {
    /// No credential on the request
    #[error("Unauthorized")]
    MissingCredential,

    /// Credential present but malformed, unknown, or expired
    #[error("Unauthorized")]
    InvalidCredential,

    /// Principal resolved but lacks the required role
    #[error("Forbidden: {} access required", required.display_name())]
    Forbidden { required: Role },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccessError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccessError::MissingCredential | AccessError::InvalidCredential => {
                StatusCode::UNAUTHORIZED
            }
            AccessError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AccessError::Database(_) | AccessError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccessError::MissingCredential | AccessError::InvalidCredential => {
                ErrorKind::Unauthorized
            }
            AccessError::Forbidden { .. } => ErrorKind::Forbidden,
            AccessError::Database(_) | AccessError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccessError::Database(e) => {
                tracing::error!(error = %e, "Access database error");
            }
            AccessError::Internal(msg) => {
                tracing::error!(message = %msg, "Access internal error");
            }
            AccessError::Forbidden { required } => {
                tracing::warn!(required = %required, "Privileged operation denied");
            }
            _ => {
                tracing::debug!(error = ?self, "Access error");
            }
        }
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        let message = match &err {
            // Never leak driver details to the client
            AccessError::Database(_) | AccessError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        AppError::new(err.kind(), message)
    }
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<platform::bearer::BearerError> for AccessError {
    fn from(err: platform::bearer::BearerError) -> Self {
        match err {
            platform::bearer::BearerError::MissingHeader => AccessError::MissingCredential,
            platform::bearer::BearerError::Malformed => AccessError::InvalidCredential,
        }
    }
}
