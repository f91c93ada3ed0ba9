//! Catalog Backend Module
//!
//! Listing lifecycle for the book marketplace.
//!
//! Clean Architecture structure:
//! - `domain/` - Book entity, value objects, repository traits
//! - `application/` - Use cases (approve / delete / update status / submit)
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Security Model
//! - Approve, delete, and status updates require the exact admin role
//! - Book ids are validated against the canonical UUID shape before any
//!   database lookup
//! - Admin mutations share one `admin_operation` rate budget per principal;
//!   attempts are recorded only after the mutation succeeds

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::catalog_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
