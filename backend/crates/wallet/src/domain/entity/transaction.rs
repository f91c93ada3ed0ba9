//! Transaction Entity

use uuid::Uuid;

use platform::rate_limit::now_ms;

/// What moved the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Tokens spent on a listing at checkout
    Purchase,
    /// Tokens credited from a confirmed cash payment
    TopUp,
}

impl TransactionKind {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Purchase => "purchase",
            TransactionKind::TopUp => "topup",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "purchase" => Some(TransactionKind::Purchase),
            "topup" => Some(TransactionKind::TopUp),
            _ => None,
        }
    }
}

/// Append-only ledger entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Originating listing for purchases; absent for top-ups
    pub book_id: Option<Uuid>,
    pub kind: TransactionKind,
    pub amount: i64,
    pub created_at_ms: i64,
}

impl Transaction {
    pub fn purchase(user_id: Uuid, book_id: Option<Uuid>, amount: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            book_id,
            kind: TransactionKind::Purchase,
            amount,
            created_at_ms: now_ms(),
        }
    }

    pub fn top_up(user_id: Uuid, amount: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            book_id: None,
            kind: TransactionKind::TopUp,
            amount,
            created_at_ms: now_ms(),
        }
    }
}
