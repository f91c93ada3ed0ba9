//! Payment Callback Use Case
//!
//! Handles the gateway's asynchronous confirmation. On a success code the
//! paid amount converts to tokens 1:1 and lands as an upsert credit, with
//! one top-up ledger entry. Any other code is logged and dropped. The
//! callback carries no signature and no dedup key; the endpoint trusts
//! the gateway's delivery as-is.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::Transaction;
use crate::domain::repository::{TokenAccountRepository, TransactionRepository};
use crate::error::WalletResult;

/// Gateway result code signalling a completed payment
const RESULT_SUCCESS: i64 = 0;

/// Callback input, already pulled out of the gateway's envelope
pub struct PaymentCallbackInput {
    /// Principal correlated through the callback URL query parameter
    pub user_id: Option<Uuid>,
    pub result_code: i64,
    /// Paid amount from the callback metadata
    pub amount: Option<f64>,
}

/// Payment callback use case
pub struct PaymentCallbackUseCase<W>
where
    W: TokenAccountRepository + TransactionRepository,
{
    wallet: Arc<W>,
}

impl<W> PaymentCallbackUseCase<W>
where
    W: TokenAccountRepository + TransactionRepository,
{
    pub fn new(wallet: Arc<W>) -> Self {
        Self { wallet }
    }

    pub async fn execute(&self, input: PaymentCallbackInput) -> WalletResult<()> {
        if input.result_code != RESULT_SUCCESS {
            tracing::info!(
                result_code = input.result_code,
                "Payment not completed, no credit"
            );
            return Ok(());
        }

        let Some(user_id) = input.user_id else {
            tracing::warn!("Payment callback without a correlated principal");
            return Ok(());
        };

        // 1 KSH = 1 token
        let tokens = match input.amount {
            Some(amount) if amount > 0.0 => amount as i64,
            _ => {
                tracing::warn!(user_id = %user_id, "Payment callback without a paid amount");
                return Ok(());
            }
        };

        let account = self.wallet.credit(user_id, tokens).await?;
        let transaction = Transaction::top_up(user_id, tokens);
        self.wallet.record_transaction(&transaction).await?;

        tracing::info!(
            user_id = %user_id,
            tokens,
            balance = account.token_balance,
            "Tokens credited from payment"
        );

        Ok(())
    }
}
