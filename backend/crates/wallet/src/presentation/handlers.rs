//! HTTP Handlers

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use std::sync::Arc;

use access::domain::repository::{PrincipalResolver, RoleRepository};
use platform::bearer::extract_bearer;
use platform::rate_limit::RateLimitStore;

use crate::application::config::WalletConfig;
use crate::application::{
    CheckoutInput, CheckoutUseCase, GetBalanceUseCase, GetHistoryUseCase, PaymentCallbackInput,
    PaymentCallbackUseCase, TopUpInput, TopUpUseCase,
};
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::{TokenAccountRepository, TransactionRepository};
use crate::error::WalletResult;
use crate::presentation::dto::{
    BalanceResponse, CallbackAck, CallbackQuery, CheckoutRequest, CheckoutResponse,
    HistoryResponse, StkCallbackEnvelope, TopUpRequest, TopUpResponse,
};

/// Shared state for wallet handlers
#[derive(Clone)]
pub struct WalletAppState<A, W, G>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Clone + Send + Sync + 'static,
    W: TokenAccountRepository + TransactionRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    pub access: Arc<A>,
    pub wallet: Arc<W>,
    pub gateway: Arc<G>,
    pub config: Arc<WalletConfig>,
}

/// Bearer credential as the use cases consume it: absent, not an error
fn credential(headers: &HeaderMap) -> Option<String> {
    extract_bearer(headers).ok().map(String::from)
}

/// POST /api/wallet/checkout
pub async fn checkout<A, W, G>(
    State(state): State<WalletAppState<A, W, G>>,
    headers: HeaderMap,
    Json(req): Json<CheckoutRequest>,
) -> WalletResult<Json<CheckoutResponse>>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Clone + Send + Sync + 'static,
    W: TokenAccountRepository + TransactionRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let use_case = CheckoutUseCase::new(
        state.access.clone(),
        state.wallet.clone(),
        state.config.clone(),
    );

    let input = CheckoutInput {
        credential: credential(&headers),
        items: req.items.into_iter().map(Into::into).collect(),
    };

    let output = use_case.execute(input).await?;

    Ok(Json(CheckoutResponse {
        success: true,
        total_tokens: output.total_tokens,
        token_balance: output.account.token_balance,
    }))
}

/// POST /api/wallet/topup
pub async fn top_up<A, W, G>(
    State(state): State<WalletAppState<A, W, G>>,
    headers: HeaderMap,
    Json(req): Json<TopUpRequest>,
) -> WalletResult<Json<TopUpResponse>>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Clone + Send + Sync + 'static,
    W: TokenAccountRepository + TransactionRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let use_case = TopUpUseCase::new(
        state.access.clone(),
        state.gateway.clone(),
        state.config.clone(),
    );

    let input = TopUpInput {
        credential: credential(&headers),
        amount: req.amount,
        phone_number: req.phone_number,
    };

    let receipt = use_case.execute(input).await?;

    Ok(Json(TopUpResponse::from_receipt(receipt)))
}

/// POST /api/wallet/mpesa/callback
///
/// Gateway-invoked; carries no bearer. Always acknowledges with
/// `{"ResultCode": 0}` so the gateway stops redelivering; failures are
/// logged, never surfaced.
pub async fn mpesa_callback<A, W, G>(
    State(state): State<WalletAppState<A, W, G>>,
    Query(query): Query<CallbackQuery>,
    Json(envelope): Json<StkCallbackEnvelope>,
) -> Json<CallbackAck>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Clone + Send + Sync + 'static,
    W: TokenAccountRepository + TransactionRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let use_case = PaymentCallbackUseCase::new(state.wallet.clone());

    let callback = envelope.body.stk_callback;
    let input = PaymentCallbackInput {
        user_id: query.user_id,
        result_code: callback.result_code,
        amount: callback.amount(),
    };

    if let Err(err) = use_case.execute(input).await {
        tracing::error!(error = %err, "Payment callback processing failed");
    }

    Json(CallbackAck { result_code: 0 })
}

/// GET /api/wallet/balance
pub async fn balance<A, W, G>(
    State(state): State<WalletAppState<A, W, G>>,
    headers: HeaderMap,
) -> WalletResult<Json<BalanceResponse>>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Clone + Send + Sync + 'static,
    W: TokenAccountRepository + TransactionRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let use_case = GetBalanceUseCase::new(state.access.clone(), state.wallet.clone());

    let account = use_case.execute(credential(&headers).as_deref()).await?;

    Ok(Json(account.into()))
}

/// GET /api/wallet/history
pub async fn history<A, W, G>(
    State(state): State<WalletAppState<A, W, G>>,
    headers: HeaderMap,
) -> WalletResult<Json<HistoryResponse>>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Clone + Send + Sync + 'static,
    W: TokenAccountRepository + TransactionRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let use_case = GetHistoryUseCase::new(state.access.clone(), state.wallet.clone());

    let transactions = use_case.execute(credential(&headers).as_deref()).await?;

    Ok(Json(HistoryResponse {
        transactions: transactions.into_iter().map(Into::into).collect(),
    }))
}
