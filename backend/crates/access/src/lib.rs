//! Access (Authorization Guard) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Role value object, repository traits
//! - `application/` - Authorization use case
//! - `infra/` - PostgreSQL implementations
//!
//! ## Security Model
//! - Bearer credentials are opaque; only their SHA-256 hash is stored
//! - Principals without a role row hold the `user` role by construction,
//!   so "no row" and "role = user" are indistinguishable at the boundary
//! - A role check verifies the required grant exactly: a moderator or user
//!   assignment never satisfies an admin requirement
//! - Identity issuance belongs to an external provider; this crate only
//!   resolves and verifies

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::authorize::AuthorizeUseCase;
pub use domain::role::Role;
pub use error::{AccessError, AccessResult};
pub use infra::postgres::PgAccessRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
