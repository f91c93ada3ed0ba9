//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the
//! infrastructure layer.

use crate::domain::entity::Book;
use crate::domain::value_object::{BookId, BookStatus};
use crate::error::CatalogResult;

/// Book repository trait
#[trait_variant::make(BookRepository: Send)]
pub trait LocalBookRepository {
    /// Persist a new submission
    async fn create(&self, book: &Book) -> CatalogResult<()>;

    /// Approve a pending book: set status to available and fix both prices
    /// in ONE atomic update. Returns `None` when the id matches no row.
    async fn approve(
        &self,
        id: BookId,
        token_price: i64,
        price_ksh: Option<f64>,
    ) -> CatalogResult<Option<Book>>;

    /// Set availability status. Returns `None` when the id matches no row.
    async fn update_status(&self, id: BookId, status: BookStatus) -> CatalogResult<Option<Book>>;

    /// Hard delete by id. Returns rows affected; deleting an absent id
    /// affects zero rows and is not an error.
    async fn delete(&self, id: BookId) -> CatalogResult<u64>;

    /// Catalog view: available books, newest first
    async fn list_available(&self) -> CatalogResult<Vec<Book>>;
}
