pub mod token_account;
pub mod transaction;

pub use token_account::TokenAccount;
pub use transaction::{Transaction, TransactionKind};
