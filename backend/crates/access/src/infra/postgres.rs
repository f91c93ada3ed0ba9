//! PostgreSQL Repository Implementations

use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repository::{PrincipalResolver, RoleRepository};
use crate::domain::role::Role;
use crate::error::AccessResult;
use platform::rate_limit::{OperationKind, RateLimitStore, now_ms};

/// PostgreSQL-backed access repository
///
/// One pool-holding struct implements principal resolution, role lookup,
/// and the rate-limit ledger so callers wire a single repository.
#[derive(Clone)]
pub struct PgAccessRepository {
    pool: PgPool,
}

impl PgAccessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete rate-limit records older than `cutoff_ms`.
    ///
    /// The ledger is append-only in the hot path; the binary calls this at
    /// startup with the largest configured window as the retention bound.
    pub async fn cleanup_rate_limits(&self, cutoff_ms: i64) -> AccessResult<u64> {
        let deleted = sqlx::query("DELETE FROM rate_limit_tracker WHERE attempted_at_ms < $1")
            .bind(cutoff_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(records_deleted = deleted, "Cleaned up stale rate limit records");

        Ok(deleted)
    }
}

/// SHA-256 of the opaque credential; only hashes touch the database
fn credential_hash(credential: &str) -> Vec<u8> {
    Sha256::digest(credential.as_bytes()).to_vec()
}

// ============================================================================
// Principal Resolver Implementation
// ============================================================================

impl PrincipalResolver for PgAccessRepository {
    async fn resolve_principal(&self, credential: &str) -> AccessResult<Option<Uuid>> {
        let principal = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT user_id
            FROM access_tokens
            WHERE token_hash = $1
              AND expires_at_ms > $2
            "#,
        )
        .bind(credential_hash(credential))
        .bind(now_ms())
        .fetch_optional(&self.pool)
        .await?;

        Ok(principal)
    }
}

// ============================================================================
// Role Repository Implementation
// ============================================================================

impl RoleRepository for PgAccessRepository {
    async fn role_of(&self, principal: Uuid) -> AccessResult<Role> {
        let code = sqlx::query_scalar::<_, String>(
            "SELECT role FROM user_roles WHERE user_id = $1",
        )
        .bind(principal)
        .fetch_optional(&self.pool)
        .await?;

        // No row means the default role, not an error
        Ok(code.map(|c| Role::from_code(&c)).unwrap_or_default())
    }
}

// ============================================================================
// Rate Limit Store Implementation
// ============================================================================

impl RateLimitStore for PgAccessRepository {
    async fn count_attempts(
        &self,
        principal: Uuid,
        operation: OperationKind,
        since_ms: i64,
    ) -> Result<u32, Box<dyn std::error::Error + Send + Sync>> {
        // A record inserted without a count reads as one attempt
        let sum = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(COALESCE(operation_count, 1)), 0)
            FROM rate_limit_tracker
            WHERE user_id = $1
              AND operation_type = $2
              AND attempted_at_ms >= $3
            "#,
        )
        .bind(principal)
        .bind(operation.as_str())
        .bind(since_ms)
        .fetch_one(&self.pool)
        .await?;

        Ok(sum.max(0) as u32)
    }

    async fn record_attempt(
        &self,
        principal: Uuid,
        operation: OperationKind,
        at_ms: i64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO rate_limit_tracker (id, user_id, operation_type, operation_count, attempted_at_ms)
            VALUES ($1, $2, $3, 1, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(principal)
        .bind(operation.as_str())
        .bind(at_ms)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
