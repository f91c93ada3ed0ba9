//! Payment Gateway Port
//!
//! Outbound interface to the mobile-money provider. The infrastructure
//! layer talks to the real gateway; tests substitute an in-memory double.

use uuid::Uuid;

use crate::error::WalletResult;

/// What the gateway acknowledged for an initiated push
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StkPushReceipt {
    pub merchant_request_id: Option<String>,
    pub checkout_request_id: Option<String>,
    pub response_description: Option<String>,
    pub customer_message: Option<String>,
}

/// Payment gateway trait
#[trait_variant::make(PaymentGateway: Send)]
pub trait LocalPaymentGateway {
    /// Prompt `phone_number` to authorize a payment of `amount`. The
    /// principal id rides along so the asynchronous confirmation can be
    /// correlated back to the right account.
    async fn initiate_stk_push(
        &self,
        principal: Uuid,
        amount: i64,
        phone_number: &str,
    ) -> WalletResult<StkPushReceipt>;
}
