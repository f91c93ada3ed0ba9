//! Authorize Use Case
//!
//! Resolves a bearer credential to a principal and verifies the required
//! role. Read-only; the guard never mutates state.

use std::sync::Arc;

use crate::domain::repository::{PrincipalResolver, RoleRepository};
use crate::domain::role::Role;
use crate::error::{AccessError, AccessResult};
use uuid::Uuid;

/// Authorization guard use case
pub struct AuthorizeUseCase<P, R>
where
    P: PrincipalResolver,
    R: RoleRepository,
{
    resolver: Arc<P>,
    roles: Arc<R>,
}

impl<P, R> AuthorizeUseCase<P, R>
where
    P: PrincipalResolver,
    R: RoleRepository,
{
    pub fn new(resolver: Arc<P>, roles: Arc<R>) -> Self {
        Self { resolver, roles }
    }

    /// Resolve `credential` and require `required`.
    ///
    /// Fails with `MissingCredential`/`InvalidCredential` (both 401) when
    /// the credential is absent or cannot be resolved, and with
    /// `Forbidden` (403) when the principal's assignment does not grant
    /// the requirement. There is no fallback to a lesser permission.
    pub async fn require_role(
        &self,
        credential: Option<&str>,
        required: Role,
    ) -> AccessResult<Uuid> {
        let credential = credential.ok_or(AccessError::MissingCredential)?;

        let principal = self
            .resolver
            .resolve_principal(credential)
            .await?
            .ok_or(AccessError::InvalidCredential)?;

        let role = self.roles.role_of(principal).await?;

        if !role.grants(required) {
            tracing::warn!(
                %principal,
                held = %role,
                required = %required,
                "Role requirement not met"
            );
            return Err(AccessError::Forbidden { required });
        }

        Ok(principal)
    }
}
