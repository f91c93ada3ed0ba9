//! Approve Book Use Case
//!
//! Admin-only transition pending -> available. Fixes the token price
//! (mandatory, positive) and optionally the KSH price in the same single
//! update as the status change. Step order is fixed and fail-fast: any
//! failed step aborts the mutation.

use std::sync::Arc;

use access::application::authorize::AuthorizeUseCase;
use access::domain::repository::{PrincipalResolver, RoleRepository};
use access::domain::role::Role;
use platform::rate_limit::{OperationKind, RateLimitStore, RateLimiter};

use crate::application::config::CatalogConfig;
use crate::domain::entity::Book;
use crate::domain::repository::BookRepository;
use crate::domain::value_object::BookId;
use crate::error::{CatalogError, CatalogResult};

/// Approve book input
pub struct ApproveBookInput {
    /// Bearer credential, if the request carried one
    pub credential: Option<String>,
    pub book_id: Option<String>,
    pub token_price: Option<i64>,
    pub price_ksh: Option<f64>,
}

/// Approve book use case
pub struct ApproveBookUseCase<A, B>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Sync,
    B: BookRepository,
{
    access: Arc<A>,
    books: Arc<B>,
    config: Arc<CatalogConfig>,
}

impl<A, B> ApproveBookUseCase<A, B>
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

    pub async fn execute(&self, input: ApproveBookInput) -> CatalogResult<Book> {
        // 1-2. Resolve the caller and require the exact admin role
        let guard = AuthorizeUseCase::new(self.access.clone(), self.access.clone());
        let principal = guard
            .require_role(input.credential.as_deref(), Role::Admin)
            .await?;

        // 3. Shape validation before any lookup
        let book_id = input
            .book_id
            .as_deref()
            .ok_or(CatalogError::MissingField("Book ID is required"))?;
        let book_id = BookId::parse(book_id).ok_or(CatalogError::InvalidBookId)?;

        // 4. Domain field validation: token price is mandatory and positive
        let token_price = match input.token_price {
            Some(price) if price > 0 => price,
            _ => return Err(CatalogError::InvalidTokenPrice),
        };
        if let Some(price_ksh) = input.price_ksh {
            if price_ksh < 0.0 {
                return Err(CatalogError::InvalidCashPrice);
            }
        }

        // 5. Rate limit the admin budget
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

        // 6. One atomic mutation: status + prices together
        let book = self
            .books
            .approve(book_id, token_price, input.price_ksh)
            .await?
            .ok_or(CatalogError::MutationFailed("Failed to approve book"))?;

        // 7. Count the successful attempt toward the window
        RateLimiter::record(
            self.access.as_ref(),
            principal,
            OperationKind::AdminOperation,
        )
        .await;

        tracing::info!(book_id = %book_id, token_price, "Book approved");

        Ok(book)
    }
}
