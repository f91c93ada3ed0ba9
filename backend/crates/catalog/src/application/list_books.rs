//! List Books Use Case
//!
//! Public catalog view. No guard and no rate budget: only approved,
//! available listings are visible and pending submissions never appear.

use std::sync::Arc;

use crate::domain::entity::Book;
use crate::domain::repository::BookRepository;
use crate::error::CatalogResult;

/// List books use case
pub struct ListBooksUseCase<B>
where
    B: BookRepository,
{
    books: Arc<B>,
}

impl<B> ListBooksUseCase<B>
where
    B: BookRepository,
{
    pub fn new(books: Arc<B>) -> Self {
        Self { books }
    }

    pub async fn execute(&self) -> CatalogResult<Vec<Book>> {
        self.books.list_available().await
    }
}
