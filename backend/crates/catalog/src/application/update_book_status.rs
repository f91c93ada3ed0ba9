//! Update Book Status Use Case
//!
//! Admin-only availability change. Available and rented swap freely;
//! pending is accepted defensively even though no shipped caller sends it.

use std::sync::Arc;

use access::application::authorize::AuthorizeUseCase;
use access::domain::repository::{PrincipalResolver, RoleRepository};
use access::domain::role::Role;
use platform::rate_limit::{OperationKind, RateLimitStore, RateLimiter};

use crate::application::config::CatalogConfig;
use crate::domain::entity::Book;
use crate::domain::repository::BookRepository;
use crate::domain::value_object::{BookId, BookStatus};
use crate::error::{CatalogError, CatalogResult};

/// Update status input
pub struct UpdateBookStatusInput {
    pub credential: Option<String>,
    pub book_id: Option<String>,
    pub status: Option<String>,
}

/// Update status use case
pub struct UpdateBookStatusUseCase<A, B>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Sync,
    B: BookRepository,
{
    access: Arc<A>,
    books: Arc<B>,
    config: Arc<CatalogConfig>,
}

impl<A, B> UpdateBookStatusUseCase<A, B>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Sync,
    B: BookRepository,
{
    pub fn new(access: Arc<A>, books: Arc<B>, config: Arc<CatalogConfig>) -> Self {
        Self {
            access,
            books,
            config,
        }
    }

    pub async fn execute(&self, input: UpdateBookStatusInput) -> CatalogResult<Book> {
        let guard = AuthorizeUseCase::new(self.access.clone(), self.access.clone());
        let principal = guard
            .require_role(input.credential.as_deref(), Role::Admin)
            .await?;

        let (book_id, status) = match (input.book_id.as_deref(), input.status.as_deref()) {
            (Some(book_id), Some(status)) => (book_id, status),
            _ => {
                return Err(CatalogError::MissingField(
                    "Book ID and status are required",
                ));
            }
        };

        let book_id = BookId::parse(book_id).ok_or(CatalogError::InvalidBookId)?;
        let status = BookStatus::parse(status).ok_or(CatalogError::InvalidStatus)?;

        let decision = RateLimiter::check(
            self.access.as_ref(),
            principal,
            OperationKind::AdminOperation,
            &self.config.admin_policy,
        )
        .await;
        if !decision.allowed {
            return Err(CatalogError::RateLimited);
        }

        let book = self
            .books
            .update_status(book_id, status)
            .await?
            .ok_or(CatalogError::MutationFailed("Failed to update book status"))?;

        RateLimiter::record(
            self.access.as_ref(),
            principal,
            OperationKind::AdminOperation,
        )
        .await;

        tracing::info!(book_id = %book_id, status = %status, "Book status updated");

        Ok(book)
    }
}
