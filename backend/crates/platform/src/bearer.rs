//! Bearer Credential Extraction
//!
//! Pulls the opaque bearer credential out of the `Authorization` header.
//! Resolution of the credential to a principal belongs to the access layer.

use axum::http::{HeaderMap, header};
use thiserror::Error;

/// Bearer extraction failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BearerError {
    /// No Authorization header on the request
    #[error("No authorization header")]
    MissingHeader,

    /// Header present but not a usable `Bearer <token>` value
    #[error("Malformed authorization header")]
    Malformed,
}

/// Extract the bearer token from the `Authorization` header.
///
/// Accepts `Bearer <token>`; the scheme is case-sensitive as in the
/// original clients. Empty tokens are rejected.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::MissingHeader)?;

    let value = value.to_str().map_err(|_| BearerError::Malformed)?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(BearerError::Malformed)?;

    if token.is_empty() {
        return Err(BearerError::Malformed);
    }

    Ok(token)
}
