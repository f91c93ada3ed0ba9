//! Catalog use-case tests with in-memory repositories.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use uuid::Uuid;

use access::domain::repository::{PrincipalResolver, RoleRepository};
use access::domain::role::Role;
use access::error::{AccessError, AccessResult};
use platform::rate_limit::{OperationKind, RateLimitStore, now_ms, policies};

use crate::application::config::CatalogConfig;
use crate::application::{
    ApproveBookInput, ApproveBookUseCase, DeleteBookInput, DeleteBookUseCase, SubmitBookInput,
    SubmitBookUseCase, UpdateBookStatusInput, UpdateBookStatusUseCase,
};
use crate::domain::entity::Book;
use crate::domain::repository::BookRepository;
use crate::domain::value_object::{BookId, BookStatus};
use crate::error::{CatalogError, CatalogResult};

#[derive(Clone, Default)]
struct MemAccess {
    tokens: Arc<Mutex<HashMap<String, Uuid>>>,
    roles: Arc<Mutex<HashMap<Uuid, Role>>>,
    attempts: Arc<Mutex<Vec<(Uuid, OperationKind, i64)>>>,
}

impl MemAccess {
    fn grant(&self, credential: &str, role: Role) -> Uuid {
        let principal = Uuid::new_v4();
        self.tokens
            .lock()
            .unwrap()
            .insert(credential.to_string(), principal);
        self.roles.lock().unwrap().insert(principal, role);
        principal
    }

    fn attempt_count(&self, principal: Uuid, operation: OperationKind) -> usize {
        self.attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, o, _)| *p == principal && *o == operation)
            .count()
    }

    fn prefill_attempts(&self, principal: Uuid, operation: OperationKind, n: usize) {
        let at = now_ms();
        let mut attempts = self.attempts.lock().unwrap();
        for _ in 0..n {
            attempts.push((principal, operation, at));
        }
    }
}

impl PrincipalResolver for MemAccess {
    async fn resolve_principal(&self, credential: &str) -> AccessResult<Option<Uuid>> {
        Ok(self.tokens.lock().unwrap().get(credential).copied())
    }
}

impl RoleRepository for MemAccess {
    async fn role_of(&self, principal: Uuid) -> AccessResult<Role> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .get(&principal)
            .copied()
            .unwrap_or_default())
    }
}

impl RateLimitStore for MemAccess {
    async fn count_attempts(
        &self,
        principal: Uuid,
        operation: OperationKind,
        since_ms: i64,
    ) -> Result<u32, Box<dyn std::error::Error + Send + Sync>> {
        let count = self
            .attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, o, at)| *p == principal && *o == operation && *at >= since_ms)
            .count();
        Ok(count as u32)
    }

    async fn record_attempt(
        &self,
        principal: Uuid,
        operation: OperationKind,
        at_ms: i64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.attempts
            .lock()
            .unwrap()
            .push((principal, operation, at_ms));
        Ok(())
    }
}

#[derive(Clone, Default)]
struct MemBooks {
    books: Arc<Mutex<HashMap<Uuid, Book>>>,
    mutation_calls: Arc<AtomicUsize>,
}

impl MemBooks {
    fn seed_pending(&self) -> Uuid {
        let book = Book::submit(
            "Dune".to_string(),
            "Frank Herbert".to_string(),
            "good".to_string(),
            None,
            Uuid::new_v4(),
        );
        let id = book.id;
        self.books.lock().unwrap().insert(id, book);
        id
    }

    fn mutations(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }
}

impl BookRepository for MemBooks {
    async fn create(&self, book: &Book) -> CatalogResult<()> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.books.lock().unwrap().insert(book.id, book.clone());
        Ok(())
    }

    async fn approve(
        &self,
        id: BookId,
        token_price: i64,
        price_ksh: Option<f64>,
    ) -> CatalogResult<Option<Book>> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        let mut books = self.books.lock().unwrap();
        Ok(books.get_mut(&id.as_uuid()).map(|book| {
            book.status = BookStatus::Available;
            book.token_price = token_price;
            if price_ksh.is_some() {
                book.price_ksh = price_ksh;
            }
            book.clone()
        }))
    }

    async fn update_status(&self, id: BookId, status: BookStatus) -> CatalogResult<Option<Book>> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        let mut books = self.books.lock().unwrap();
        Ok(books.get_mut(&id.as_uuid()).map(|book| {
            book.status = status;
            book.clone()
        }))
    }

    async fn delete(&self, id: BookId) -> CatalogResult<u64> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        let removed = self.books.lock().unwrap().remove(&id.as_uuid());
        Ok(if removed.is_some() { 1 } else { 0 })
    }

    async fn list_available(&self) -> CatalogResult<Vec<Book>> {
        let mut books: Vec<Book> = self
            .books
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.status == BookStatus::Available)
            .cloned()
            .collect();
        books.sort_by_key(|b| std::cmp::Reverse(b.created_at_ms));
        Ok(books)
    }
}

fn setup() -> (Arc<MemAccess>, Arc<MemBooks>, Arc<CatalogConfig>) {
    (
        Arc::new(MemAccess::default()),
        Arc::new(MemBooks::default()),
        Arc::new(CatalogConfig::default()),
    )
}

fn approve_input(credential: &str, book_id: Uuid) -> ApproveBookInput {
    ApproveBookInput {
        credential: Some(credential.to_string()),
        book_id: Some(book_id.to_string()),
        token_price: Some(25),
        price_ksh: None,
    }
}

#[tokio::test]
async fn test_approve_without_credential_touches_nothing() {
    let (access, books, config) = setup();
    let book_id = books.seed_pending();

    let use_case = ApproveBookUseCase::new(access.clone(), books.clone(), config);
    let mut input = approve_input("ignored", book_id);
    input.credential = None;

    let err = use_case.execute(input).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Access(AccessError::MissingCredential)
    ));
    assert_eq!(err.to_string(), "Unauthorized");
    assert_eq!(books.mutations(), 0);
    assert!(access.attempts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_approve_as_plain_user_is_forbidden() {
    let (access, books, config) = setup();
    let principal = access.grant("user-token", Role::User);
    let book_id = books.seed_pending();

    let use_case = ApproveBookUseCase::new(access.clone(), books.clone(), config);
    let err = use_case
        .execute(approve_input("user-token", book_id))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Forbidden: Admin access required");
    assert_eq!(books.mutations(), 0);
    assert_eq!(access.attempt_count(principal, OperationKind::AdminOperation), 0);
}

#[tokio::test]
async fn test_approve_rejects_malformed_id_before_lookup() {
    let (access, books, config) = setup();
    access.grant("admin-token", Role::Admin);

    let use_case = ApproveBookUseCase::new(access.clone(), books.clone(), config);
    let input = ApproveBookInput {
        credential: Some("admin-token".to_string()),
        book_id: Some("not-a-uuid".to_string()),
        token_price: Some(25),
        price_ksh: None,
    };

    let err = use_case.execute(input).await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidBookId));
    assert_eq!(books.mutations(), 0);
}

#[tokio::test]
async fn test_approve_requires_missing_book_id_field() {
    let (access, books, config) = setup();
    access.grant("admin-token", Role::Admin);

    let use_case = ApproveBookUseCase::new(access.clone(), books.clone(), config);
    let input = ApproveBookInput {
        credential: Some("admin-token".to_string()),
        book_id: None,
        token_price: Some(25),
        price_ksh: None,
    };

    let err = use_case.execute(input).await.unwrap_err();
    assert_eq!(err.to_string(), "Book ID is required");
}

#[tokio::test]
async fn test_approve_rejects_non_positive_token_price() {
    let (access, books, config) = setup();
    access.grant("admin-token", Role::Admin);
    let book_id = books.seed_pending();

    let use_case = ApproveBookUseCase::new(access.clone(), books.clone(), config);
    for token_price in [None, Some(0), Some(-5)] {
        let input = ApproveBookInput {
            credential: Some("admin-token".to_string()),
            book_id: Some(book_id.to_string()),
            token_price,
            price_ksh: None,
        };
        let err = use_case.execute(input).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidTokenPrice));
    }
    assert_eq!(books.mutations(), 0);
}

#[tokio::test]
async fn test_approve_success_fixes_prices_and_records_attempt() {
    let (access, books, config) = setup();
    let principal = access.grant("admin-token", Role::Admin);
    let book_id = books.seed_pending();

    let use_case = ApproveBookUseCase::new(access.clone(), books.clone(), config);
    let input = ApproveBookInput {
        credential: Some("admin-token".to_string()),
        book_id: Some(book_id.to_string()),
        token_price: Some(25),
        price_ksh: Some(500.0),
    };

    let book = use_case.execute(input).await.unwrap();
    assert_eq!(book.status, BookStatus::Available);
    assert_eq!(book.token_price, 25);
    assert_eq!(book.price_ksh, Some(500.0));
    assert_eq!(access.attempt_count(principal, OperationKind::AdminOperation), 1);
}

#[tokio::test]
async fn test_approve_missing_book_reports_failure_without_recording() {
    let (access, books, config) = setup();
    let principal = access.grant("admin-token", Role::Admin);

    let use_case = ApproveBookUseCase::new(access.clone(), books.clone(), config);
    let err = use_case
        .execute(approve_input("admin-token", Uuid::new_v4()))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Failed to approve book");
    // The mutation ran but applied to zero rows; no attempt is counted
    assert_eq!(access.attempt_count(principal, OperationKind::AdminOperation), 0);
}

#[tokio::test]
async fn test_admin_budget_exhaustion_denies_without_mutating() {
    let (access, books, config) = setup();
    let principal = access.grant("admin-token", Role::Admin);
    let book_id = books.seed_pending();
    access.prefill_attempts(
        principal,
        OperationKind::AdminOperation,
        policies::ADMIN_OPERATION.max_attempts as usize,
    );

    let use_case = ApproveBookUseCase::new(access.clone(), books.clone(), config);
    let err = use_case
        .execute(approve_input("admin-token", book_id))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::RateLimited));
    assert_eq!(err.to_string(), "Rate limit exceeded. Please try again later.");
    assert_eq!(books.mutations(), 0);
    // A denied check consumes no budget
    assert_eq!(
        access.attempt_count(principal, OperationKind::AdminOperation),
        policies::ADMIN_OPERATION.max_attempts as usize
    );
}

#[tokio::test]
async fn test_delete_twice_is_a_no_op_success() {
    let (access, books, config) = setup();
    access.grant("admin-token", Role::Admin);
    let book_id = books.seed_pending();

    let use_case = DeleteBookUseCase::new(access.clone(), books.clone(), config);
    let input = || DeleteBookInput {
        credential: Some("admin-token".to_string()),
        book_id: Some(book_id.to_string()),
    };

    use_case.execute(input()).await.unwrap();
    use_case.execute(input()).await.unwrap();
    assert!(books.books.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_status_requires_both_fields() {
    let (access, books, config) = setup();
    access.grant("admin-token", Role::Admin);
    let book_id = books.seed_pending();

    let use_case = UpdateBookStatusUseCase::new(access.clone(), books.clone(), config);
    for (id, status) in [
        (None, Some("rented".to_string())),
        (Some(book_id.to_string()), None),
        (None, None),
    ] {
        let err = use_case
            .execute(UpdateBookStatusInput {
                credential: Some("admin-token".to_string()),
                book_id: id,
                status,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Book ID and status are required");
    }
}

#[tokio::test]
async fn test_update_status_rejects_unknown_status() {
    let (access, books, config) = setup();
    access.grant("admin-token", Role::Admin);
    let book_id = books.seed_pending();

    let use_case = UpdateBookStatusUseCase::new(access.clone(), books.clone(), config);
    let err = use_case
        .execute(UpdateBookStatusInput {
            credential: Some("admin-token".to_string()),
            book_id: Some(book_id.to_string()),
            status: Some("sold".to_string()),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::InvalidStatus));
    assert_eq!(err.to_string(), "Invalid status value");
    assert_eq!(books.mutations(), 0);
}

#[tokio::test]
async fn test_update_status_swaps_availability() {
    let (access, books, config) = setup();
    access.grant("admin-token", Role::Admin);
    let book_id = books.seed_pending();

    let use_case = UpdateBookStatusUseCase::new(access.clone(), books.clone(), config);
    let book = use_case
        .execute(UpdateBookStatusInput {
            credential: Some("admin-token".to_string()),
            book_id: Some(book_id.to_string()),
            status: Some("rented".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(book.status, BookStatus::Rented);
}

#[tokio::test]
async fn test_submission_enters_catalog_pending_and_hidden() {
    let (access, books, config) = setup();
    let principal = access.grant("user-token", Role::User);

    let use_case = SubmitBookUseCase::new(access.clone(), books.clone(), config);
    let book = use_case
        .execute(SubmitBookInput {
            credential: Some("user-token".to_string()),
            title: Some("Dune".to_string()),
            author: Some("Frank Herbert".to_string()),
            condition: Some("good".to_string()),
            image_url: None,
        })
        .await
        .unwrap();

    assert_eq!(book.status, BookStatus::Pending);
    assert_eq!(book.owner_id, principal);
    assert_eq!(access.attempt_count(principal, OperationKind::BookUpload), 1);
    // Pending listings never reach the public view
    assert!(books.list_available().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_submission_requires_title() {
    let (access, books, config) = setup();
    access.grant("user-token", Role::User);

    let use_case = SubmitBookUseCase::new(access.clone(), books.clone(), config);
    let err = use_case
        .execute(SubmitBookInput {
            credential: Some("user-token".to_string()),
            title: Some("   ".to_string()),
            author: Some("Frank Herbert".to_string()),
            condition: Some("good".to_string()),
            image_url: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Title is required");
    assert_eq!(books.mutations(), 0);
}

#[tokio::test]
async fn test_submission_respects_upload_budget() {
    let (access, books, config) = setup();
    let principal = access.grant("user-token", Role::User);
    access.prefill_attempts(
        principal,
        OperationKind::BookUpload,
        policies::BOOK_UPLOAD.max_attempts as usize,
    );

    let use_case = SubmitBookUseCase::new(access.clone(), books.clone(), config);
    let err = use_case
        .execute(SubmitBookInput {
            credential: Some("user-token".to_string()),
            title: Some("Dune".to_string()),
            author: Some("Frank Herbert".to_string()),
            condition: Some("good".to_string()),
            image_url: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::RateLimited));
    assert_eq!(books.mutations(), 0);
}
