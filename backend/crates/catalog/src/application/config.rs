//! Application Configuration
//!
//! Configuration for the catalog application layer.

use platform::rate_limit::{RateLimitPolicy, policies};

/// Catalog application configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Rate policy shared by all privileged admin mutations
    pub admin_policy: RateLimitPolicy,
    /// Rate policy for owner submissions
    pub upload_policy: RateLimitPolicy,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            admin_policy: policies::ADMIN_OPERATION,
            upload_policy: policies::BOOK_UPLOAD,
        }
    }
}
