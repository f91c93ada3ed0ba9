//! Application Configuration
//!
//! Configuration for the wallet application layer.

use platform::rate_limit::{RateLimitPolicy, policies};

/// Wallet application configuration
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// Rate policy shared by checkout and top-up initiation
    pub purchase_policy: RateLimitPolicy,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            purchase_policy: policies::TOKEN_PURCHASE,
        }
    }
}
