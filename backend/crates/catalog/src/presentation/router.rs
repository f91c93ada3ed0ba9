//! Catalog Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use access::domain::repository::{PrincipalResolver, RoleRepository};
use access::infra::postgres::PgAccessRepository;
use platform::rate_limit::RateLimitStore;

use crate::application::config::CatalogConfig;
use crate::domain::repository::BookRepository;
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the Catalog router with PostgreSQL repositories
pub fn catalog_router(
    access: PgAccessRepository,
    books: PgCatalogRepository,
    config: CatalogConfig,
) -> Router {
    catalog_router_generic(access, books, config)
}

/// Create a generic Catalog router for any repository implementation
pub fn catalog_router_generic<A, B>(access: A, books: B, config: CatalogConfig) -> Router
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Clone + Send + Sync + 'static,
    B: BookRepository + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        access: Arc::new(access),
        books: Arc::new(books),
        config: Arc::new(config),
    };

    Router::new()
        .route("/admin/approve", post(handlers::approve_book::<A, B>))
        .route("/admin/delete", post(handlers::delete_book::<A, B>))
        .route("/admin/status", post(handlers::update_book_status::<A, B>))
        .route(
            "/books",
            post(handlers::submit_book::<A, B>).get(handlers::list_books::<A, B>),
        )
        .with_state(state)
}
