//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::WalletAppState;
pub use router::{wallet_router, wallet_router_generic};
