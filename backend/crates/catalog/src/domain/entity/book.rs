//! Book Entity

use uuid::Uuid;

use crate::domain::value_object::BookStatus;
use platform::rate_limit::now_ms;

/// A listing offered for trade.
///
/// The token price is fixed by the approval mutation, not at submission;
/// a pending book carries a zero price that never reaches the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub condition: String,
    pub image_url: Option<String>,
    pub status: BookStatus,
    pub token_price: i64,
    pub price_ksh: Option<f64>,
    pub owner_id: Uuid,
    pub created_at_ms: i64,
}

impl Book {
    /// New owner submission, awaiting approval
    pub fn submit(
        title: String,
        author: String,
        condition: String,
        image_url: Option<String>,
        owner_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            author,
            condition,
            image_url,
            status: BookStatus::Pending,
            token_price: 0,
            price_ksh: None,
            owner_id,
            created_at_ms: now_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_starts_pending() {
        let owner = Uuid::new_v4();
        let book = Book::submit(
            "Dune".to_string(),
            "Frank Herbert".to_string(),
            "good".to_string(),
            None,
            owner,
        );
        assert_eq!(book.status, BookStatus::Pending);
        assert_eq!(book.token_price, 0);
        assert_eq!(book.price_ksh, None);
        assert_eq!(book.owner_id, owner);
    }
}
