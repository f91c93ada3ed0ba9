//! PostgreSQL Repository Implementation

use sqlx::PgPool;

use crate::domain::entity::Book;
use crate::domain::repository::BookRepository;
use crate::domain::value_object::{BookId, BookStatus};
use crate::error::{CatalogError, CatalogResult};

const BOOK_COLUMNS: &str = "id, title, author, condition, image_url, \
     availability_status, token_price, price_ksh, owner_id, created_at_ms";

/// PostgreSQL-backed book repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: uuid::Uuid,
    title: String,
    author: String,
    condition: String,
    image_url: Option<String>,
    availability_status: String,
    token_price: i64,
    price_ksh: Option<f64>,
    owner_id: uuid::Uuid,
    created_at_ms: i64,
}

impl BookRow {
    fn into_book(self) -> CatalogResult<Book> {
        let status = BookStatus::parse(&self.availability_status).ok_or_else(|| {
            CatalogError::Database(sqlx::Error::Decode(
                format!("unknown availability_status: {}", self.availability_status).into(),
            ))
        })?;
        Ok(Book {
            id: self.id,
            title: self.title,
            author: self.author,
            condition: self.condition,
            image_url: self.image_url,
            status,
            token_price: self.token_price,
            price_ksh: self.price_ksh,
            owner_id: self.owner_id,
            created_at_ms: self.created_at_ms,
        })
    }
}

impl BookRepository for PgCatalogRepository {
    async fn create(&self, book: &Book) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO books
                (id, title, author, condition, image_url,
                 availability_status, token_price, price_ksh, owner_id, created_at_ms)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.condition)
        .bind(&book.image_url)
        .bind(book.status.as_str())
        .bind(book.token_price)
        .bind(book.price_ksh)
        .bind(book.owner_id)
        .bind(book.created_at_ms)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn approve(
        &self,
        id: BookId,
        token_price: i64,
        price_ksh: Option<f64>,
    ) -> CatalogResult<Option<Book>> {
        // Status and prices move in the same statement; an absent KSH price
        // leaves the stored one untouched
        let row = sqlx::query_as::<_, BookRow>(&format!(
            r#"
            UPDATE books
            SET availability_status = 'available',
                token_price = $2,
                price_ksh = COALESCE($3, price_ksh)
            WHERE id = $1
            RETURNING {BOOK_COLUMNS}
            "#,
        ))
        .bind(id.as_uuid())
        .bind(token_price)
        .bind(price_ksh)
        .fetch_optional(&self.pool)
        .await?;

        row.map(BookRow::into_book).transpose()
    }

    async fn update_status(&self, id: BookId, status: BookStatus) -> CatalogResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            r#"
            UPDATE books
            SET availability_status = $2
            WHERE id = $1
            RETURNING {BOOK_COLUMNS}
            "#,
        ))
        .bind(id.as_uuid())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(BookRow::into_book).transpose()
    }

    async fn delete(&self, id: BookId) -> CatalogResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_available(&self) -> CatalogResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(&format!(
            r#"
            SELECT {BOOK_COLUMNS}
            FROM books
            WHERE availability_status = 'available'
            ORDER BY created_at_ms DESC
            "#,
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookRow::into_book).collect()
    }
}
