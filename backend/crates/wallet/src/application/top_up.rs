//! Top-Up Use Case
//!
//! Initiates a cash-to-tokens purchase by prompting the caller's phone
//! through the payment gateway. Tokens are NOT credited here; the credit
//! lands when the gateway confirms the payment through the callback.

use std::sync::Arc;

use access::application::authorize::AuthorizeUseCase;
use access::domain::repository::{PrincipalResolver, RoleRepository};
use access::domain::role::Role;
use platform::rate_limit::{OperationKind, RateLimitStore, RateLimiter};

use crate::application::config::WalletConfig;
use crate::domain::gateway::{PaymentGateway, StkPushReceipt};
use crate::error::{WalletError, WalletResult};

/// Top-up input
pub struct TopUpInput {
    pub credential: Option<String>,
    pub amount: Option<i64>,
    pub phone_number: Option<String>,
}

/// Top-up use case
pub struct TopUpUseCase<A, G>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Sync,
    G: PaymentGateway,
{
    access: Arc<A>,
    gateway: Arc<G>,
    config: Arc<WalletConfig>,
}

impl<A, G> TopUpUseCase<A, G>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Sync,
    G: PaymentGateway,
{
    pub fn new(access: Arc<A>, gateway: Arc<G>, config: Arc<WalletConfig>) -> Self {
        Self {
            access,
            gateway,
            config,
        }
    }

    pub async fn execute(&self, input: TopUpInput) -> WalletResult<StkPushReceipt> {
        let guard = AuthorizeUseCase::new(self.access.clone(), self.access.clone());
        let principal = guard
            .require_role(input.credential.as_deref(), Role::User)
            .await?;

        let amount = match input.amount {
            Some(amount) if amount > 0 => amount,
            _ => return Err(WalletError::InvalidAmount),
        };
        let phone_number = input
            .phone_number
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or(WalletError::MissingField("Phone number is required"))?;

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

        let receipt = self
            .gateway
            .initiate_stk_push(principal, amount, phone_number)
            .await?;

        RateLimiter::record(
            self.access.as_ref(),
            principal,
            OperationKind::TokenPurchase,
        )
        .await;

        tracing::info!(principal = %principal, amount, "STK push initiated");

        Ok(receipt)
    }
}
