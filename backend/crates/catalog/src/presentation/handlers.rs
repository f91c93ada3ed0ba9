//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use std::sync::Arc;

use access::domain::repository::{PrincipalResolver, RoleRepository};
use platform::bearer::extract_bearer;
use platform::rate_limit::RateLimitStore;

use crate::application::config::CatalogConfig;
use crate::application::{
    ApproveBookInput, ApproveBookUseCase, DeleteBookInput, DeleteBookUseCase, ListBooksUseCase,
    SubmitBookInput, SubmitBookUseCase, UpdateBookStatusInput, UpdateBookStatusUseCase,
};
use crate::domain::repository::BookRepository;
use crate::error::CatalogResult;
use crate::presentation::dto::{
    ApproveBookRequest, BookListResponse, BookMutationResponse, DeleteBookRequest,
    MutationResponse, SubmitBookRequest, UpdateBookStatusRequest,
};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<A, B>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Clone + Send + Sync + 'static,
    B: BookRepository + Clone + Send + Sync + 'static,
{
    pub access: Arc<A>,
    pub books: Arc<B>,
    pub config: Arc<CatalogConfig>,
}

/// Bearer credential as the use cases consume it: absent, not an error
fn credential(headers: &HeaderMap) -> Option<String> {
    extract_bearer(headers).ok().map(String::from)
}

// ============================================================================
// Admin Mutations
// ============================================================================

/// POST /api/catalog/admin/approve
pub async fn approve_book<A, B>(
    State(state): State<CatalogAppState<A, B>>,
    headers: HeaderMap,
    Json(req): Json<ApproveBookRequest>,
) -> CatalogResult<Json<BookMutationResponse>>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Clone + Send + Sync + 'static,
    B: BookRepository + Clone + Send + Sync + 'static,
{
    let use_case = ApproveBookUseCase::new(
        state.access.clone(),
        state.books.clone(),
        state.config.clone(),
    );

    let input = ApproveBookInput {
        credential: credential(&headers),
        book_id: req.book_id,
        token_price: req.token_price,
        price_ksh: req.price_ksh,
    };

    let book = use_case.execute(input).await?;

    Ok(Json(BookMutationResponse {
        success: true,
        book: book.into(),
    }))
}

/// POST /api/catalog/admin/delete
pub async fn delete_book<A, B>(
    State(state): State<CatalogAppState<A, B>>,
    headers: HeaderMap,
    Json(req): Json<DeleteBookRequest>,
) -> CatalogResult<Json<MutationResponse>>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Clone + Send + Sync + 'static,
    B: BookRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteBookUseCase::new(
        state.access.clone(),
        state.books.clone(),
        state.config.clone(),
    );

    let input = DeleteBookInput {
        credential: credential(&headers),
        book_id: req.book_id,
    };

    use_case.execute(input).await?;

    Ok(Json(MutationResponse { success: true }))
}

/// POST /api/catalog/admin/status
pub async fn update_book_status<A, B>(
    State(state): State<CatalogAppState<A, B>>,
    headers: HeaderMap,
    Json(req): Json<UpdateBookStatusRequest>,
) -> CatalogResult<Json<BookMutationResponse>>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Clone + Send + Sync + 'static,
    B: BookRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateBookStatusUseCase::new(
        state.access.clone(),
        state.books.clone(),
        state.config.clone(),
    );

    let input = UpdateBookStatusInput {
        credential: credential(&headers),
        book_id: req.book_id,
        status: req.status,
    };

    let book = use_case.execute(input).await?;

    Ok(Json(BookMutationResponse {
        success: true,
        book: book.into(),
    }))
}

// ============================================================================
// Owner Submission / Catalog View
// ============================================================================

/// POST /api/catalog/books
pub async fn submit_book<A, B>(
    State(state): State<CatalogAppState<A, B>>,
    headers: HeaderMap,
    Json(req): Json<SubmitBookRequest>,
) -> CatalogResult<(StatusCode, Json<BookMutationResponse>)>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Clone + Send + Sync + 'static,
    B: BookRepository + Clone + Send + Sync + 'static,
{
    let use_case = SubmitBookUseCase::new(
        state.access.clone(),
        state.books.clone(),
        state.config.clone(),
    );

    let input = SubmitBookInput {
        credential: credential(&headers),
        title: req.title,
        author: req.author,
        condition: req.condition,
        image_url: req.image_url,
    };

    let book = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookMutationResponse {
            success: true,
            book: book.into(),
        }),
    ))
}

/// GET /api/catalog/books
pub async fn list_books<A, B>(
    State(state): State<CatalogAppState<A, B>>,
) -> CatalogResult<Json<BookListResponse>>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Clone + Send + Sync + 'static,
    B: BookRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListBooksUseCase::new(state.books.clone());

    let books = use_case.execute().await?;

    Ok(Json(BookListResponse {
        books: books.into_iter().map(Into::into).collect(),
    }))
}
