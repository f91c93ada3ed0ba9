//! Token Account Entity

use uuid::Uuid;

/// Per-principal token ledger row.
///
/// Created lazily on first credit; a principal without a row reads as the
/// zeroed account, never as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAccount {
    pub user_id: Uuid,
    pub token_balance: i64,
    pub total_earned: i64,
    pub total_spent: i64,
}

impl TokenAccount {
    /// The account a principal holds before any credit has landed
    pub fn zeroed(user_id: Uuid) -> Self {
        Self {
            user_id,
            token_balance: 0,
            total_earned: 0,
            total_spent: 0,
        }
    }
}
