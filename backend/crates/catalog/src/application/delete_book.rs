//! Delete Book Use Case
//!
//! Admin-only unconditional hard delete. Deleting an id that no longer
//! exists is a no-op success: the mutation targets one row and re-invoking
//! it is safe against client-side retry.

use std::sync::Arc;

use access::application::authorize::AuthorizeUseCase;
use access::domain::repository::{PrincipalResolver, RoleRepository};
use access::domain::role::Role;
use platform::rate_limit::{OperationKind, RateLimitStore, RateLimiter};

use crate::application::config::CatalogConfig;
use crate::domain::repository::BookRepository;
use crate::domain::value_object::BookId;
use crate::error::{CatalogError, CatalogResult};

/// Delete book input
pub struct DeleteBookInput {
    pub credential: Option<String>,
    pub book_id: Option<String>,
}

/// Delete book use case
pub struct DeleteBookUseCase<A, B>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Sync,
    B: BookRepository,
{
    access: Arc<A>,
    books: Arc<B>,
    config: Arc<CatalogConfig>,
}

impl<A, B> DeleteBookUseCase<A, B>
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

    pub async fn execute(&self, input: DeleteBookInput) -> CatalogResult<()> {
        let guard = AuthorizeUseCase::new(self.access.clone(), self.access.clone());
        let principal = guard
            .require_role(input.credential.as_deref(), Role::Admin)
            .await?;

        let book_id = input
            .book_id
            .as_deref()
            .ok_or(CatalogError::MissingField("Book ID is required"))?;
        let book_id = BookId::parse(book_id).ok_or(CatalogError::InvalidBookId)?;

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

        let deleted = self.books.delete(book_id).await?;

        RateLimiter::record(
            self.access.as_ref(),
            principal,
            OperationKind::AdminOperation,
        )
        .await;

        tracing::info!(book_id = %book_id, rows = deleted, "Book deleted");

        Ok(())
    }
}
