//! PostgreSQL Repository Implementation

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{TokenAccount, Transaction, TransactionKind};
use crate::domain::repository::{TokenAccountRepository, TransactionRepository};
use crate::error::{WalletError, WalletResult};

/// PostgreSQL-backed wallet repository
///
/// One pool-holding struct implements the account ledger and the
/// transaction log so callers wire a single repository.
#[derive(Clone)]
pub struct PgWalletRepository {
    pool: PgPool,
}

impl PgWalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    user_id: Uuid,
    token_balance: i64,
    total_earned: i64,
    total_spent: i64,
}

impl From<AccountRow> for TokenAccount {
    fn from(row: AccountRow) -> Self {
        Self {
            user_id: row.user_id,
            token_balance: row.token_balance,
            total_earned: row.total_earned,
            total_spent: row.total_spent,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    user_id: Uuid,
    book_id: Option<Uuid>,
    kind: String,
    amount: i64,
    created_at_ms: i64,
}

impl TransactionRow {
    fn into_transaction(self) -> WalletResult<Transaction> {
        let kind = TransactionKind::parse(&self.kind).ok_or_else(|| {
            WalletError::Database(sqlx::Error::Decode(
                format!("unknown transaction kind: {}", self.kind).into(),
            ))
        })?;
        Ok(Transaction {
            id: self.id,
            user_id: self.user_id,
            book_id: self.book_id,
            kind,
            amount: self.amount,
            created_at_ms: self.created_at_ms,
        })
    }
}

impl TokenAccountRepository for PgWalletRepository {
    async fn debit_if_sufficient(
        &self,
        principal: Uuid,
        amount: i64,
    ) -> WalletResult<Option<TokenAccount>> {
        // The balance guard lives in the statement itself; a short balance
        // matches zero rows and nothing moves
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            UPDATE user_tokens
            SET token_balance = token_balance - $2,
                total_spent = total_spent + $2
            WHERE user_id = $1
              AND token_balance >= $2
            RETURNING user_id, token_balance, total_earned, total_spent
            "#,
        )
        .bind(principal)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn credit(&self, principal: Uuid, amount: i64) -> WalletResult<TokenAccount> {
        // Lazy account creation: first credit seeds the row
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO user_tokens (user_id, token_balance, total_earned, total_spent)
            VALUES ($1, $2, $2, 0)
            ON CONFLICT (user_id) DO UPDATE
            SET token_balance = user_tokens.token_balance + $2,
                total_earned = user_tokens.total_earned + $2
            RETURNING user_id, token_balance, total_earned, total_spent
            "#,
        )
        .bind(principal)
        .bind(amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_account(&self, principal: Uuid) -> WalletResult<Option<TokenAccount>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT user_id, token_balance, total_earned, total_spent
            FROM user_tokens
            WHERE user_id = $1
            "#,
        )
        .bind(principal)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}

impl TransactionRepository for PgWalletRepository {
    async fn record_transaction(&self, transaction: &Transaction) -> WalletResult<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, user_id, book_id, kind, amount, created_at_ms)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(transaction.id)
        .bind(transaction.user_id)
        .bind(transaction.book_id)
        .bind(transaction.kind.as_str())
        .bind(transaction.amount)
        .bind(transaction.created_at_ms)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn history(&self, principal: Uuid) -> WalletResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, user_id, book_id, kind, amount, created_at_ms
            FROM transactions
            WHERE user_id = $1
            ORDER BY created_at_ms DESC
            "#,
        )
        .bind(principal)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(TransactionRow::into_transaction)
            .collect()
    }
}
