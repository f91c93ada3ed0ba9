//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the
//! infrastructure layer.

use uuid::Uuid;

use crate::domain::entity::{TokenAccount, Transaction};
use crate::error::WalletResult;

/// Token account repository trait
#[trait_variant::make(TokenAccountRepository: Send)]
pub trait LocalTokenAccountRepository {
    /// Debit `amount` from the principal's balance only when the balance
    /// covers it, in ONE conditional update that also bumps `total_spent`.
    /// Returns the updated account, or `None` when the balance is short
    /// (or no account exists) and nothing was touched.
    async fn debit_if_sufficient(
        &self,
        principal: Uuid,
        amount: i64,
    ) -> WalletResult<Option<TokenAccount>>;

    /// Credit `amount` to the principal's balance, bumping `total_earned`.
    /// Creates the account seeded with the amount when no row exists yet.
    async fn credit(&self, principal: Uuid, amount: i64) -> WalletResult<TokenAccount>;

    /// Fetch the principal's account, if one exists
    async fn find_account(&self, principal: Uuid) -> WalletResult<Option<TokenAccount>>;
}

/// Transaction ledger repository trait
#[trait_variant::make(TransactionRepository: Send)]
pub trait LocalTransactionRepository {
    /// Append one ledger entry
    async fn record_transaction(&self, transaction: &Transaction) -> WalletResult<()>;

    /// A principal's ledger entries, newest first
    async fn history(&self, principal: Uuid) -> WalletResult<Vec<Transaction>>;
}
