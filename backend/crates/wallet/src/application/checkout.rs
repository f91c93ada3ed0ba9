//! Checkout Use Case
//!
//! Spends tokens on the token-paid cart lines. The debit is one
//! conditional update: either the balance covers the whole total and the
//! account moves in a single statement, or nothing moves at all. One
//! ledger entry is appended per token line, tagged with the originating
//! listing so history joins back to the catalog.

use std::sync::Arc;

use access::application::authorize::AuthorizeUseCase;
use access::domain::repository::{PrincipalResolver, RoleRepository};
use access::domain::role::Role;
use platform::rate_limit::{OperationKind, RateLimitStore, RateLimiter};

use crate::application::config::WalletConfig;
use crate::domain::cart::{Cart, CartItem, PaymentMethod};
use crate::domain::entity::{TokenAccount, Transaction};
use crate::domain::repository::{TokenAccountRepository, TransactionRepository};
use crate::error::{WalletError, WalletResult};

/// Checkout input
pub struct CheckoutInput {
    pub credential: Option<String>,
    pub items: Vec<CartItem>,
}

/// Checkout output
#[derive(Debug)]
pub struct CheckoutOutput {
    pub account: TokenAccount,
    pub total_tokens: i64,
}

/// Checkout use case
pub struct CheckoutUseCase<A, W>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Sync,
    W: TokenAccountRepository + TransactionRepository,
{
    access: Arc<A>,
    wallet: Arc<W>,
    config: Arc<WalletConfig>,
}

impl<A, W> CheckoutUseCase<A, W>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Sync,
    W: TokenAccountRepository + TransactionRepository,
{
    pub fn new(access: Arc<A>, wallet: Arc<W>, config: Arc<WalletConfig>) -> Self {
        Self {
            access,
            wallet,
            config,
        }
    }

    pub async fn execute(&self, input: CheckoutInput) -> WalletResult<CheckoutOutput> {
        let guard = AuthorizeUseCase::new(self.access.clone(), self.access.clone());
        let principal = guard
            .require_role(input.credential.as_deref(), Role::User)
            .await?;

        if input.items.is_empty() {
            return Err(WalletError::MissingField("Cart items are required"));
        }
        for line in &input.items {
            if line.quantity == 0 {
                return Err(WalletError::InvalidCartItem);
            }
            if line.payment_method == PaymentMethod::Tokens && line.token_value <= 0 {
                return Err(WalletError::InvalidCartItem);
            }
        }

        let cart = Cart::from_lines(input.items);
        let total_tokens = cart.total_tokens();
        if total_tokens == 0 {
            return Err(WalletError::MissingField("No token items in cart"));
        }

        let decision = RateLimiter::check(
            self.access.as_ref(),
            principal,
            OperationKind::TokenPurchase,
            &self.config.purchase_policy,
        )
        .await;
        if !decision.allowed {
            return Err(WalletError::RateLimited);
        }

        let account = self
            .wallet
            .debit_if_sufficient(principal, total_tokens)
            .await?
            .ok_or(WalletError::InsufficientFunds)?;

        for line in cart.lines() {
            if line.payment_method != PaymentMethod::Tokens {
                continue;
            }
            let amount = line.token_value * i64::from(line.quantity);
            let transaction = Transaction::purchase(principal, line.book_id, amount);
            self.wallet.record_transaction(&transaction).await?;
        }

        RateLimiter::record(
            self.access.as_ref(),
            principal,
            OperationKind::TokenPurchase,
        )
        .await;

        tracing::info!(
            principal = %principal,
            total_tokens,
            balance = account.token_balance,
            "Checkout completed"
        );

        Ok(CheckoutOutput {
            account,
            total_tokens,
        })
    }
}
