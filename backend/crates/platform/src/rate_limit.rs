//! Rate Limiting Infrastructure
//!
//! Fixed trailing-window rate limiting for privileged operations.
//! The store keeps an append-only ledger of attempts; a check sums the
//! attempts recorded within `now - window` and compares against the policy
//! budget. Attempts are recorded only after the guarded operation succeeds,
//! so denied checks and failed mutations never consume budget.
//!
//! The check/record pair is not atomic: two concurrent requests from the
//! same principal can both be admitted at the threshold. Accepted for an
//! abuse-prevention control; see the tests for the documented race.

use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Operation types tracked per principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Login,
    BookUpload,
    TokenPurchase,
    AdminOperation,
}

impl OperationKind {
    /// Tag stored in the ledger's `operation_type` column
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Login => "login",
            OperationKind::BookUpload => "book_upload",
            OperationKind::TokenPurchase => "token_purchase",
            OperationKind::AdminOperation => "admin_operation",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rate limit policy: budget per trailing window
#[derive(Debug, Clone, Copy)]
pub struct RateLimitPolicy {
    /// Maximum attempts allowed in the window
    pub max_attempts: u32,
    /// Time window duration
    pub window: Duration,
}

impl RateLimitPolicy {
    pub const fn new(max_attempts: u32, window_secs: u64) -> Self {
        Self {
            max_attempts,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::new(10, 60)
    }
}

/// Default policies per operation type
pub mod policies {
    use super::RateLimitPolicy;

    /// 5 attempts per 15 minutes
    pub const LOGIN: RateLimitPolicy = RateLimitPolicy::new(5, 15 * 60);
    /// 10 attempts per hour
    pub const BOOK_UPLOAD: RateLimitPolicy = RateLimitPolicy::new(10, 60 * 60);
    /// 10 attempts per hour
    pub const TOKEN_PURCHASE: RateLimitPolicy = RateLimitPolicy::new(10, 60 * 60);
    /// 50 attempts per minute
    pub const ADMIN_OPERATION: RateLimitPolicy = RateLimitPolicy::new(50, 60);
}

/// Rate limit check result
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Attempts left after the one about to be recorded
    pub remaining: u32,
}

type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Trait for rate limit ledger backends
///
/// `count_attempts` must treat a record with a missing count as 1
/// (`SUM(COALESCE(operation_count, 1))` in the Postgres implementation).
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Sum attempt counts for (principal, operation) since `since_ms`
    async fn count_attempts(
        &self,
        principal: Uuid,
        operation: OperationKind,
        since_ms: i64,
    ) -> Result<u32, StoreError>;

    /// Append one attempt record timestamped `at_ms`
    async fn record_attempt(
        &self,
        principal: Uuid,
        operation: OperationKind,
        at_ms: i64,
    ) -> Result<(), StoreError>;
}

/// Trailing-window limiter over a [`RateLimitStore`]
pub struct RateLimiter;

impl RateLimiter {
    /// Check the budget for (principal, operation) without recording.
    ///
    /// Fails open: a store read error admits the request with the full
    /// budget, so a storage outage never blocks legitimate traffic.
    pub async fn check<S>(
        store: &S,
        principal: Uuid,
        operation: OperationKind,
        policy: &RateLimitPolicy,
    ) -> RateLimitDecision
    where
        S: RateLimitStore + Sync,
    {
        let since_ms = now_ms() - policy.window_ms();

        let count = match store.count_attempts(principal, operation, since_ms).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    %principal,
                    %operation,
                    "Rate limit check failed, failing open"
                );
                return RateLimitDecision {
                    allowed: true,
                    remaining: policy.max_attempts,
                };
            }
        };

        if count >= policy.max_attempts {
            tracing::warn!(
                count,
                max = policy.max_attempts,
                %principal,
                %operation,
                "Rate limit exceeded"
            );
            RateLimitDecision {
                allowed: false,
                remaining: 0,
            }
        } else {
            RateLimitDecision {
                allowed: true,
                remaining: policy.max_attempts - count - 1,
            }
        }
    }

    /// Record one successful attempt timestamped now.
    ///
    /// Best effort: the guarded operation already succeeded, so a write
    /// failure is logged and swallowed.
    pub async fn record<S>(store: &S, principal: Uuid, operation: OperationKind)
    where
        S: RateLimitStore + Sync,
    {
        if let Err(e) = store.record_attempt(principal, operation, now_ms()).await {
            tracing::warn!(
                error = %e,
                %principal,
                %operation,
                "Failed to record rate limit attempt"
            );
        }
    }
}

/// Current time as epoch milliseconds
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
