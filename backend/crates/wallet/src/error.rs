//! Wallet Error Types
//!
//! This module provides wallet-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use access::AccessError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Wallet-specific result type alias
pub type WalletResult<T> = Result<T, WalletError>;

/// Wallet-specific error variants
#[derive(Debug, Error)]
pub enum WalletError {
    /// Authorization guard failure (401/403)
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Required request field missing
    #[error("{0}")]
    MissingField(&'static str),

    /// Top-up amount missing, zero, or negative
    #[error("Valid amount is required")]
    InvalidAmount,

    /// Cart line with zero quantity or a non-positive token value
    #[error("Invalid cart item")]
    InvalidCartItem,

    /// Token balance below the cart total; the conditional debit
    /// touched zero rows
    #[error("Insufficient token balance")]
    InsufficientFunds,

    /// Rate budget for the operation exhausted
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Payment gateway rejected or failed the outbound call.
    /// The inner detail is logged, never sent to the client.
    #[error("Payment gateway error")]
    Gateway(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl WalletError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WalletError::Access(e) => e.status_code(),
            WalletError::MissingField(_)
            | WalletError::InvalidAmount
            | WalletError::InvalidCartItem => StatusCode::BAD_REQUEST,
            WalletError::InsufficientFunds => StatusCode::PAYMENT_REQUIRED,
            WalletError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            WalletError::Gateway(_) => StatusCode::BAD_GATEWAY,
            WalletError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::Access(e) => e.kind(),
            WalletError::MissingField(_)
            | WalletError::InvalidAmount
            | WalletError::InvalidCartItem => ErrorKind::BadRequest,
            WalletError::InsufficientFunds => ErrorKind::PaymentRequired,
            WalletError::RateLimited => ErrorKind::TooManyRequests,
            WalletError::Gateway(_) => ErrorKind::BadGateway,
            WalletError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            WalletError::Database(e) => {
                tracing::error!(error = %e, "Wallet database error");
            }
            WalletError::Gateway(detail) => {
                tracing::error!(detail = %detail, "Payment gateway error");
            }
            WalletError::RateLimited => {
                tracing::warn!("Wallet rate limit exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Wallet error");
            }
        }
    }
}

impl From<WalletError> for AppError {
    fn from(err: WalletError) -> Self {
        let message = match &err {
            // Never leak driver details to the client
            WalletError::Database(_)
            | WalletError::Access(AccessError::Database(_) | AccessError::Internal(_)) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        AppError::new(err.kind(), message)
    }
}

impl IntoResponse for WalletError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
