//! Get Balance Use Case

use std::sync::Arc;

use access::application::authorize::AuthorizeUseCase;
use access::domain::repository::{PrincipalResolver, RoleRepository};
use access::domain::role::Role;
use platform::rate_limit::RateLimitStore;

use crate::domain::entity::TokenAccount;
use crate::domain::repository::TokenAccountRepository;
use crate::error::WalletResult;

/// Get balance use case
///
/// A principal without an account row reads as the zeroed account.
pub struct GetBalanceUseCase<A, W>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Sync,
    W: TokenAccountRepository,
{
    access: Arc<A>,
    wallet: Arc<W>,
}

impl<A, W> GetBalanceUseCase<A, W>
where
    A: PrincipalResolver + RoleRepository + RateLimitStore + Sync,
    W: TokenAccountRepository,
{
    pub fn new(access: Arc<A>, wallet: Arc<W>) -> Self {
        Self { access, wallet }
    }

    pub async fn execute(&self, credential: Option<&str>) -> WalletResult<TokenAccount> {
        let guard = AuthorizeUseCase::new(self.access.clone(), self.access.clone());
        let principal = guard.require_role(credential, Role::User).await?;

        let account = self
            .wallet
            .find_account(principal)
            .await?
            .unwrap_or_else(|| TokenAccount::zeroed(principal));

        Ok(account)
    }
}
