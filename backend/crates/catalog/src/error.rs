//! Catalog Error Types
//!
//! This module provides catalog-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use access::AccessError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Authorization guard failure (401/403)
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Required request field missing
    #[error("{0}")]
    MissingField(&'static str),

    /// Book id does not match the UUID shape
    #[error("Invalid book ID format")]
    InvalidBookId,

    /// Status outside {available, rented, pending}
    #[error("Invalid status value")]
    InvalidStatus,

    /// Token price missing, zero, or negative
    #[error("Valid token price is required")]
    InvalidTokenPrice,

    /// KSH price present but negative
    #[error("Valid KSH price is required")]
    InvalidCashPrice,

    /// Rate budget for the operation exhausted
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// The single domain mutation did not apply
    #[error("{0}")]
    MutationFailed(&'static str),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Access(e) => e.status_code(),
            CatalogError::MissingField(_)
            | CatalogError::InvalidBookId
            | CatalogError::InvalidStatus
            | CatalogError::InvalidTokenPrice
            | CatalogError::InvalidCashPrice => StatusCode::BAD_REQUEST,
            CatalogError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            CatalogError::MutationFailed(_) | CatalogError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Access(e) => e.kind(),
            CatalogError::MissingField(_)
            | CatalogError::InvalidBookId
            | CatalogError::InvalidStatus
            | CatalogError::InvalidTokenPrice
            | CatalogError::InvalidCashPrice => ErrorKind::BadRequest,
            CatalogError::RateLimited => ErrorKind::TooManyRequests,
            CatalogError::MutationFailed(_) | CatalogError::Database(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::MutationFailed(msg) => {
                tracing::error!(message = %msg, "Catalog mutation failed");
            }
            CatalogError::RateLimited => {
                tracing::warn!("Catalog rate limit exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let message = match &err {
            // Never leak driver details to the client
            CatalogError::Database(_)
            | CatalogError::Access(AccessError::Database(_) | AccessError::Internal(_)) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        AppError::new(err.kind(), message)
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
