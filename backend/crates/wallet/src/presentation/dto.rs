//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::cart::{CartItem, PaymentMethod};
use crate::domain::entity::{TokenAccount, Transaction};
use crate::domain::gateway::StkPushReceipt;

// ============================================================================
// Checkout
// ============================================================================

/// Checkout request
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CartLineDto>,
}

/// One cart line on the wire
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    pub book_id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub token_value: i64,
    pub price: Option<f64>,
    pub payment_method: PaymentMethod,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl From<CartLineDto> for CartItem {
    fn from(dto: CartLineDto) -> Self {
        Self {
            book_id: dto.book_id,
            title: dto.title,
            author: dto.author.unwrap_or_default(),
            condition: dto.condition.unwrap_or_default(),
            image_url: dto.image,
            token_value: dto.token_value,
            price: dto.price,
            payment_method: dto.payment_method,
            quantity: dto.quantity,
        }
    }
}

/// Checkout response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    pub total_tokens: i64,
    pub token_balance: i64,
}

// ============================================================================
// Top-Up
// ============================================================================

/// Top-up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUpRequest {
    pub amount: Option<i64>,
    pub phone_number: Option<String>,
}

/// Top-up response, echoing what the gateway acknowledged
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUpResponse {
    pub success: bool,
    pub merchant_request_id: Option<String>,
    pub checkout_request_id: Option<String>,
    pub customer_message: Option<String>,
}

impl TopUpResponse {
    pub fn from_receipt(receipt: StkPushReceipt) -> Self {
        Self {
            success: true,
            merchant_request_id: receipt.merchant_request_id,
            checkout_request_id: receipt.checkout_request_id,
            customer_message: receipt.customer_message,
        }
    }
}

// ============================================================================
// Gateway Callback
// ============================================================================

/// Query string on the callback URL
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackQuery {
    pub user_id: Option<Uuid>,
}

/// Gateway callback envelope: `{"Body": {"stkCallback": {...}}}`
#[derive(Debug, Clone, Deserialize)]
pub struct StkCallbackEnvelope {
    #[serde(rename = "Body")]
    pub body: StkCallbackBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StkCallbackBody {
    #[serde(rename = "stkCallback")]
    pub stk_callback: StkCallback,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StkCallback {
    #[serde(rename = "ResultCode")]
    pub result_code: i64,
    #[serde(rename = "CallbackMetadata")]
    pub callback_metadata: Option<CallbackMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackMetadata {
    #[serde(rename = "Item", default)]
    pub items: Vec<CallbackMetadataItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackMetadataItem {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: Option<serde_json::Value>,
}

impl StkCallback {
    /// Paid amount from the metadata items, when present
    pub fn amount(&self) -> Option<f64> {
        self.callback_metadata
            .as_ref()?
            .items
            .iter()
            .find(|item| item.name == "Amount")?
            .value
            .as_ref()?
            .as_f64()
    }
}

/// Acknowledgement the gateway expects back
#[derive(Debug, Clone, Serialize)]
pub struct CallbackAck {
    #[serde(rename = "ResultCode")]
    pub result_code: i64,
}

// ============================================================================
// Reads
// ============================================================================

/// Balance response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub token_balance: i64,
    pub total_earned: i64,
    pub total_spent: i64,
}

impl From<TokenAccount> for BalanceResponse {
    fn from(account: TokenAccount) -> Self {
        Self {
            token_balance: account.token_balance,
            total_earned: account.total_earned,
            total_spent: account.total_spent,
        }
    }
}

/// History response
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub transactions: Vec<TransactionDto>,
}

/// Ledger entry on the wire
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: Uuid,
    pub book_id: Option<Uuid>,
    pub kind: String,
    pub amount: i64,
    pub created_at_ms: i64,
}

impl From<Transaction> for TransactionDto {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            book_id: transaction.book_id,
            kind: transaction.kind.as_str().to_string(),
            amount: transaction.amount,
            created_at_ms: transaction.created_at_ms,
        }
    }
}
