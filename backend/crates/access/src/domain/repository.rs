//! Repository Traits
//!
//! Interfaces for identity resolution. Implementation is in the
//! infrastructure layer; the identity provider that issues credentials
//! is an external collaborator.

use crate::domain::role::Role;
use crate::error::AccessResult;
use uuid::Uuid;

/// Resolves opaque bearer credentials to principals
#[trait_variant::make(PrincipalResolver: Send)]
pub trait LocalPrincipalResolver {
    /// Resolve a credential to a principal id.
    ///
    /// Returns `None` for unknown or expired credentials; the caller maps
    /// that to an authentication failure.
    async fn resolve_principal(&self, credential: &str) -> AccessResult<Option<Uuid>>;
}

/// Looks up role assignments
#[trait_variant::make(RoleRepository: Send)]
pub trait LocalRoleRepository {
    /// Role assigned to the principal.
    ///
    /// Must return `Role::User` when no assignment row exists.
    async fn role_of(&self, principal: Uuid) -> AccessResult<Role>;
}
