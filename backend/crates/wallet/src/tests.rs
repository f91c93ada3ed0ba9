//! Wallet use-case tests with in-memory repositories and gateway double.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use uuid::Uuid;

use access::domain::repository::{PrincipalResolver, RoleRepository};
use access::domain::role::Role;
use access::error::AccessResult;
use platform::rate_limit::{OperationKind, RateLimitStore, policies};

use crate::application::config::WalletConfig;
use crate::application::{
    CheckoutInput, CheckoutUseCase, GetBalanceUseCase, PaymentCallbackInput,
    PaymentCallbackUseCase, TopUpInput, TopUpUseCase,
};
use crate::domain::cart::{CartItem, PaymentMethod};
use crate::domain::entity::{TokenAccount, Transaction, TransactionKind};
use crate::domain::gateway::{PaymentGateway, StkPushReceipt};
use crate::domain::repository::{TokenAccountRepository, TransactionRepository};
use crate::error::{WalletError, WalletResult};

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

    fn attempt_count(&self, principal: Uuid) -> usize {
        self.attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _, _)| *p == principal)
            .count()
    }

    fn exhaust_purchase_budget(&self, principal: Uuid) {
        let at = platform::rate_limit::now_ms();
        let mut attempts = self.attempts.lock().unwrap();
        for _ in 0..policies::TOKEN_PURCHASE.max_attempts {
            attempts.push((principal, OperationKind::TokenPurchase, at));
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
struct MemWallet {
    accounts: Arc<Mutex<HashMap<Uuid, TokenAccount>>>,
    transactions: Arc<Mutex<Vec<Transaction>>>,
}

impl MemWallet {
    fn seed(&self, principal: Uuid, balance: i64) {
        self.accounts.lock().unwrap().insert(
            principal,
            TokenAccount {
                user_id: principal,
                token_balance: balance,
                total_earned: balance,
                total_spent: 0,
            },
        );
    }

    fn balance_of(&self, principal: Uuid) -> Option<i64> {
        self.accounts
            .lock()
            .unwrap()
            .get(&principal)
            .map(|a| a.token_balance)
    }
}

impl TokenAccountRepository for MemWallet {
    async fn debit_if_sufficient(
        &self,
        principal: Uuid,
        amount: i64,
    ) -> WalletResult<Option<TokenAccount>> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.get_mut(&principal) {
            Some(account) if account.token_balance >= amount => {
                account.token_balance -= amount;
                account.total_spent += amount;
                Ok(Some(account.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn credit(&self, principal: Uuid, amount: i64) -> WalletResult<TokenAccount> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .entry(principal)
            .or_insert_with(|| TokenAccount::zeroed(principal));
        account.token_balance += amount;
        account.total_earned += amount;
        Ok(account.clone())
    }

    async fn find_account(&self, principal: Uuid) -> WalletResult<Option<TokenAccount>> {
        Ok(self.accounts.lock().unwrap().get(&principal).cloned())
    }
}

impl TransactionRepository for MemWallet {
    async fn record_transaction(&self, transaction: &Transaction) -> WalletResult<()> {
        self.transactions.lock().unwrap().push(transaction.clone());
        Ok(())
    }

    async fn history(&self, principal: Uuid) -> WalletResult<Vec<Transaction>> {
        let mut entries: Vec<Transaction> = self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == principal)
            .cloned()
            .collect();
        entries.sort_by_key(|t| std::cmp::Reverse(t.created_at_ms));
        Ok(entries)
    }
}

#[derive(Clone, Default)]
struct MemGateway {
    pushes: Arc<AtomicUsize>,
}

impl PaymentGateway for MemGateway {
    async fn initiate_stk_push(
        &self,
        _principal: Uuid,
        _amount: i64,
        _phone_number: &str,
    ) -> WalletResult<StkPushReceipt> {
        self.pushes.fetch_add(1, Ordering::SeqCst);
        Ok(StkPushReceipt {
            merchant_request_id: Some("mr-1".to_string()),
            checkout_request_id: Some("cr-1".to_string()),
            response_description: Some("Success".to_string()),
            customer_message: Some("Request accepted".to_string()),
        })
    }
}

fn setup() -> (Arc<MemAccess>, Arc<MemWallet>, Arc<WalletConfig>) {
    (
        Arc::new(MemAccess::default()),
        Arc::new(MemWallet::default()),
        Arc::new(WalletConfig::default()),
    )
}

fn token_line(book_id: Uuid, token_value: i64, quantity: u32) -> CartItem {
    CartItem {
        book_id: Some(book_id),
        title: format!("Book {book_id}"),
        author: "A. Author".to_string(),
        condition: "good".to_string(),
        image_url: None,
        token_value,
        price: None,
        payment_method: PaymentMethod::Tokens,
        quantity,
    }
}

#[tokio::test]
async fn test_checkout_insufficient_balance_leaves_account_untouched() {
    let (access, wallet, config) = setup();
    let principal = access.grant("user-token", Role::User);
    wallet.seed(principal, 100);

    let use_case = CheckoutUseCase::new(access.clone(), wallet.clone(), config);
    let err = use_case
        .execute(CheckoutInput {
            credential: Some("user-token".to_string()),
            items: vec![token_line(Uuid::new_v4(), 120, 1)],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, WalletError::InsufficientFunds));
    assert_eq!(err.to_string(), "Insufficient token balance");
    assert_eq!(wallet.balance_of(principal), Some(100));
    assert!(wallet.transactions.lock().unwrap().is_empty());
    // A failed checkout does not count toward the purchase budget
    assert_eq!(access.attempt_count(principal), 0);
}

#[tokio::test]
async fn test_checkout_debits_and_records_one_entry_per_line() {
    let (access, wallet, config) = setup();
    let principal = access.grant("user-token", Role::User);
    wallet.seed(principal, 100);
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    let use_case = CheckoutUseCase::new(access.clone(), wallet.clone(), config);
    let output = use_case
        .execute(CheckoutInput {
            credential: Some("user-token".to_string()),
            items: vec![token_line(first, 10, 2), token_line(second, 5, 1)],
        })
        .await
        .unwrap();

    assert_eq!(output.total_tokens, 25);
    assert_eq!(output.account.token_balance, 75);
    assert_eq!(output.account.total_spent, 25);

    let transactions = wallet.transactions.lock().unwrap();
    assert_eq!(transactions.len(), 2);
    assert!(transactions.iter().all(|t| t.kind == TransactionKind::Purchase));
    assert!(transactions.iter().any(|t| t.book_id == Some(first) && t.amount == 20));
    assert!(transactions.iter().any(|t| t.book_id == Some(second) && t.amount == 5));
    drop(transactions);

    assert_eq!(access.attempt_count(principal), 1);
}

#[tokio::test]
async fn test_checkout_requires_items() {
    let (access, wallet, config) = setup();
    access.grant("user-token", Role::User);

    let use_case = CheckoutUseCase::new(access.clone(), wallet.clone(), config);
    let err = use_case
        .execute(CheckoutInput {
            credential: Some("user-token".to_string()),
            items: vec![],
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Cart items are required");
}

#[tokio::test]
async fn test_checkout_rejects_unresolvable_credential() {
    let (access, wallet, config) = setup();

    let use_case = CheckoutUseCase::new(access.clone(), wallet.clone(), config);
    let err = use_case
        .execute(CheckoutInput {
            credential: Some("unknown".to_string()),
            items: vec![token_line(Uuid::new_v4(), 10, 1)],
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Unauthorized");
}

#[tokio::test]
async fn test_checkout_rejects_zero_value_token_line() {
    let (access, wallet, config) = setup();
    let principal = access.grant("user-token", Role::User);
    wallet.seed(principal, 100);

    let use_case = CheckoutUseCase::new(access.clone(), wallet.clone(), config);
    let err = use_case
        .execute(CheckoutInput {
            credential: Some("user-token".to_string()),
            items: vec![token_line(Uuid::new_v4(), 0, 1)],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, WalletError::InvalidCartItem));
    assert_eq!(wallet.balance_of(principal), Some(100));
}

#[tokio::test]
async fn test_top_up_prompts_gateway_and_counts_attempt() {
    let (access, _, config) = setup();
    let principal = access.grant("user-token", Role::User);
    let gateway = Arc::new(MemGateway::default());

    let use_case = TopUpUseCase::new(access.clone(), gateway.clone(), config);
    let receipt = use_case
        .execute(TopUpInput {
            credential: Some("user-token".to_string()),
            amount: Some(50),
            phone_number: Some("254700000000".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(receipt.checkout_request_id.as_deref(), Some("cr-1"));
    assert_eq!(gateway.pushes.load(Ordering::SeqCst), 1);
    assert_eq!(access.attempt_count(principal), 1);
}

#[tokio::test]
async fn test_top_up_rejects_non_positive_amount() {
    let (access, _, config) = setup();
    access.grant("user-token", Role::User);
    let gateway = Arc::new(MemGateway::default());

    let use_case = TopUpUseCase::new(access.clone(), gateway.clone(), config);
    for amount in [None, Some(0), Some(-10)] {
        let err = use_case
            .execute(TopUpInput {
                credential: Some("user-token".to_string()),
                amount,
                phone_number: Some("254700000000".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Valid amount is required");
    }
    assert_eq!(gateway.pushes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_top_up_budget_exhaustion_skips_gateway() {
    let (access, _, config) = setup();
    let principal = access.grant("user-token", Role::User);
    access.exhaust_purchase_budget(principal);
    let gateway = Arc::new(MemGateway::default());

    let use_case = TopUpUseCase::new(access.clone(), gateway.clone(), config);
    let err = use_case
        .execute(TopUpInput {
            credential: Some("user-token".to_string()),
            amount: Some(50),
            phone_number: Some("254700000000".to_string()),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, WalletError::RateLimited));
    assert_eq!(gateway.pushes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_callback_success_credits_lazily_created_account() {
    let (_, wallet, _) = setup();
    let principal = Uuid::new_v4();

    let use_case = PaymentCallbackUseCase::new(wallet.clone());
    use_case
        .execute(PaymentCallbackInput {
            user_id: Some(principal),
            result_code: 0,
            amount: Some(50.0),
        })
        .await
        .unwrap();

    let account = wallet.find_account(principal).await.unwrap().unwrap();
    assert_eq!(account.token_balance, 50);
    assert_eq!(account.total_earned, 50);

    let transactions = wallet.transactions.lock().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].kind, TransactionKind::TopUp);
    assert_eq!(transactions[0].amount, 50);
}

#[tokio::test]
async fn test_callback_failure_code_credits_nothing() {
    let (_, wallet, _) = setup();
    let principal = Uuid::new_v4();

    let use_case = PaymentCallbackUseCase::new(wallet.clone());
    use_case
        .execute(PaymentCallbackInput {
            user_id: Some(principal),
            result_code: 1032,
            amount: Some(50.0),
        })
        .await
        .unwrap();

    assert!(wallet.find_account(principal).await.unwrap().is_none());
    assert!(wallet.transactions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_callback_without_principal_credits_nothing() {
    let (_, wallet, _) = setup();

    let use_case = PaymentCallbackUseCase::new(wallet.clone());
    use_case
        .execute(PaymentCallbackInput {
            user_id: None,
            result_code: 0,
            amount: Some(50.0),
        })
        .await
        .unwrap();

    assert!(wallet.accounts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_balance_defaults_to_zeroed_account() {
    let (access, wallet, _) = setup();
    let principal = access.grant("user-token", Role::User);

    let use_case = GetBalanceUseCase::new(access.clone(), wallet.clone());
    let account = use_case.execute(Some("user-token")).await.unwrap();

    assert_eq!(account.user_id, principal);
    assert_eq!(account.token_balance, 0);
    assert_eq!(account.total_earned, 0);
    assert_eq!(account.total_spent, 0);
}
