//! Infrastructure Layer
//!
//! Database and payment gateway implementations.

pub mod daraja;
pub mod postgres;

pub use daraja::{DarajaClient, DarajaConfig};
pub use postgres::PgWalletRepository;
