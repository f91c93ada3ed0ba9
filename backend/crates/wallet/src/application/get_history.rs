//! Get History Use Case

use std::sync::Arc;

use access::application::authorize::AuthorizeUseCase;
use access::domain::repository::{PrincipalResolver, RoleRepository};
use access::domain::role::Role;
use platform::rate_limit::RateLimitStore;

use crate::domain::entity::Transaction;
use crate::domain::repository::TransactionRepository;
use crate::error::WalletResult;

/// Get history use case
pub struct GetHistoryUseCase<A, W>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Sync,
    W: TransactionRepository,
{
    access: Arc<A>,
    wallet: Arc<W>,
}

impl<A, W> GetHistoryUseCase<A, W>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Sync,
    W: TransactionRepository,
{
    pub fn new(access: Arc<A>, wallet: Arc<W>) -> Self {
        Self { access, wallet }
    }

    /// The caller's ledger entries, newest first
    pub async fn execute(&self, credential: Option<&str>) -> WalletResult<Vec<Transaction>> {
        let guard = AuthorizeUseCase::new(self.access.clone(), self.access.clone());
        let principal = guard.require_role(credential, Role::User).await?;

        self.wallet.history(principal).await
    }
}
