//! Submit Book Use Case
//!
//! Any authenticated user may list a book. New listings always enter the
//! pending state and stay invisible to browsers until an admin approves
//! them and fixes the token price.

use std::sync::Arc;

use access::application::authorize::AuthorizeUseCase;
use access::domain::repository::{PrincipalResolver, RoleRepository};
use access::domain::role::Role;
use platform::rate_limit::{OperationKind, RateLimitStore, RateLimiter};

use crate::application::config::CatalogConfig;
use crate::domain::entity::Book;
use crate::domain::repository::BookRepository;
use crate::error::{CatalogError, CatalogResult};

/// Submit book input
pub struct SubmitBookInput {
    pub credential: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub condition: Option<String>,
    pub image_url: Option<String>,
}

/// Submit book use case
pub struct SubmitBookUseCase<A, B>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Sync,
    B: BookRepository,
{
    access: Arc<A>,
    books: Arc<B>,
    config: Arc<CatalogConfig>,
}

impl<A, B> SubmitBookUseCase<A, B>
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

    pub async fn execute(&self, input: SubmitBookInput) -> CatalogResult<Book> {
        let guard = AuthorizeUseCase::new(self.access.clone(), self.access.clone());
        let principal = guard
            .require_role(input.credential.as_deref(), Role::User)
            .await?;

        let title = non_empty(input.title.as_deref())
            .ok_or(CatalogError::MissingField("Title is required"))?;
        let author = non_empty(input.author.as_deref())
            .ok_or(CatalogError::MissingField("Author is required"))?;
        let condition = non_empty(input.condition.as_deref())
            .ok_or(CatalogError::MissingField("Condition is required"))?;

        let decision = RateLimiter::check(
            self.access.as_ref(),
            principal,
            OperationKind::BookUpload,
            &self.config.upload_policy,
        )
        .await;
        if !decision.allowed {
            return Err(CatalogError::RateLimited);
        }

        let book = Book::submit(
            title.to_owned(),
            author.to_owned(),
            condition.to_owned(),
            input.image_url.clone(),
            principal,
        );
        self.books.create(&book).await?;

        RateLimiter::record(self.access.as_ref(), principal, OperationKind::BookUpload).await;

        tracing::info!(book_id = %book.id, owner_id = %principal, "Book submitted");

        Ok(book)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
