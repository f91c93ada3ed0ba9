//! Wallet (Token Ledger) Backend Module
//!
//! Token accounts, cart arithmetic, checkout, and cash top-up through the
//! mobile-money gateway.
//!
//! Clean Architecture structure:
//! - `domain/` - Cart, account/transaction entities, repository and gateway traits
//! - `application/` - Use cases (checkout / top-up / callback / reads)
//! - `infra/` - Database and gateway implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Ledger Model
//! - Balances never go negative: the checkout debit is one conditional
//!   update guarded by the current balance
//! - Credits upsert, creating the account lazily on first top-up
//! - The transaction log is append-only; purchases carry the originating
//!   listing id
//! - The gateway callback is unauthenticated and trusted as delivered

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::WalletConfig;
pub use error::{WalletError, WalletResult};
pub use infra::daraja::{DarajaClient, DarajaConfig};
pub use infra::postgres::PgWalletRepository;
pub use presentation::router::wallet_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::cart::*;
    pub use crate::domain::entity::*;
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
