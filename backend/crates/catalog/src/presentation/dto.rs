//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::Book;

// ============================================================================
// Admin Mutations
// ============================================================================

/// Approve request
///
/// Fields are optional on the wire so that missing values produce the
/// domain's 400 messages instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveBookRequest {
    pub book_id: Option<String>,
    pub token_price: Option<i64>,
    pub price_ksh: Option<f64>,
}

/// Delete request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBookRequest {
    pub book_id: Option<String>,
}

/// Status update request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookStatusRequest {
    pub book_id: Option<String>,
    pub status: Option<String>,
}

/// Mutation response carrying the updated book
#[derive(Debug, Clone, Serialize)]
pub struct BookMutationResponse {
    pub success: bool,
    pub book: BookDto,
}

/// Mutation response without a body payload (delete)
#[derive(Debug, Clone, Serialize)]
pub struct MutationResponse {
    pub success: bool,
}

// ============================================================================
// Owner Submission / Catalog View
// ============================================================================

/// Submit request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub condition: Option<String>,
    pub image_url: Option<String>,
}

/// Catalog listing response
#[derive(Debug, Clone, Serialize)]
pub struct BookListResponse {
    pub books: Vec<BookDto>,
}

/// Book representation on the wire
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub condition: String,
    pub image_url: Option<String>,
    pub availability_status: String,
    pub token_price: i64,
    pub price_ksh: Option<f64>,
    pub owner_id: Uuid,
    pub created_at_ms: i64,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            condition: book.condition,
            image_url: book.image_url,
            availability_status: book.status.as_str().to_string(),
            token_price: book.token_price,
            price_ksh: book.price_ksh,
            owner_id: book.owner_id,
            created_at_ms: book.created_at_ms,
        }
    }
}
