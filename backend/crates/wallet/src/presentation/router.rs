//! Wallet Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use access::domain::repository::{PrincipalResolver, RoleRepository};
use access::infra::postgres::PgAccessRepository;
use platform::rate_limit::RateLimitStore;

use crate::application::config::WalletConfig;
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::{TokenAccountRepository, TransactionRepository};
use crate::infra::daraja::DarajaClient;
use crate::infra::postgres::PgWalletRepository;
use crate::presentation::handlers::{self, WalletAppState};

/// Create the Wallet router with PostgreSQL repositories and the real gateway
pub fn wallet_router(
    access: PgAccessRepository,
    wallet: PgWalletRepository,
    gateway: DarajaClient,
    config: WalletConfig,
) -> Router {
    wallet_router_generic(access, wallet, gateway, config)
}

/// Create a generic Wallet router for any repository/gateway implementation
pub fn wallet_router_generic<A, W, G>(
    access: A,
    wallet: W,
    gateway: G,
    config: WalletConfig,
) -> Router
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Clone + Send + Sync + 'static,
    W: TokenAccountRepository + TransactionRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let state = WalletAppState {
        access: Arc::new(access),
        wallet: Arc::new(wallet),
        gateway: Arc::new(gateway),
        config: Arc::new(config),
    };

    Router::new()
        .route("/checkout", post(handlers::checkout::<A, W, G>))
        .route("/topup", post(handlers::top_up::<A, W, G>))
        .route("/mpesa/callback", post(handlers::mpesa_callback::<A, W, G>))
        .route("/balance", get(handlers::balance::<A, W, G>))
        .route("/history", get(handlers::history::<A, W, G>))
        .with_state(state)
}
