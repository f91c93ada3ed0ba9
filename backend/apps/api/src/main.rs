//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use access::PgAccessRepository;
use axum::{
    Router,
    http::{HeaderName, Method, header},
};
use catalog::{CatalogConfig, PgCatalogRepository, catalog_router};
use platform::rate_limit::{now_ms, policies};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wallet::{DarajaClient, DarajaConfig, PgWalletRepository, WalletConfig, wallet_router};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,access=info,catalog=info,wallet=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: drop rate-limit records older than the largest
    // configured window. Errors here should not prevent server startup.
    let access_repo = PgAccessRepository::new(pool.clone());
    let retention_ms = [
        policies::LOGIN,
        policies::BOOK_UPLOAD,
        policies::TOKEN_PURCHASE,
        policies::ADMIN_OPERATION,
    ]
    .iter()
    .map(|policy| policy.window_ms())
    .max()
    .unwrap_or(0);
    match access_repo.cleanup_rate_limits(now_ms() - retention_ms).await {
        Ok(deleted) => {
            tracing::info!(records_deleted = deleted, "Rate limit cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rate limit cleanup failed, continuing anyway");
        }
    }

    // Payment gateway configuration
    let public_base_url =
        env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:31113".to_string());
    let daraja_config = DarajaConfig {
        consumer_key: env::var("MPESA_CONSUMER_KEY").unwrap_or_default(),
        consumer_secret: env::var("MPESA_CONSUMER_SECRET").unwrap_or_default(),
        shortcode: env::var("MPESA_SHORTCODE").unwrap_or_default(),
        passkey: env::var("MPESA_PASSKEY").unwrap_or_default(),
        base_url: env::var("MPESA_BASE_URL")
            .unwrap_or_else(|_| wallet::infra::daraja::SANDBOX_BASE_URL.to_string()),
        callback_base_url: public_base_url,
    };
    if daraja_config.consumer_key.is_empty() {
        tracing::warn!("MPESA_CONSUMER_KEY not set, top-up initiation will fail");
    }
    let daraja = DarajaClient::new(daraja_config);

    // Repositories
    let catalog_repo = PgCatalogRepository::new(pool.clone());
    let wallet_repo = PgWalletRepository::new(pool.clone());

    // CORS configuration: browser clients call from arbitrary origins and
    // the payment gateway posts the callback, so the surface stays open
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ]));

    // Build router
    let app = Router::new()
        .nest(
            "/api/catalog",
            catalog_router(access_repo.clone(), catalog_repo, CatalogConfig::default()),
        )
        .nest(
            "/api/wallet",
            wallet_router(access_repo, wallet_repo, daraja, WalletConfig::default()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 31113));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
