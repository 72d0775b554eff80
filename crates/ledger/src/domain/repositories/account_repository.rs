// crates/ledger/src/domain/repositories/account_repository.rs

use async_trait::async_trait;
use transactor::domain::context::Context;

use crate::domain::entities::Account;
use crate::domain::value_objects::AccountId;
use crate::errors::Result;

/// Les implémentations résolvent leur runner depuis `ctx` : le même appel
/// tourne dans la transaction en cours ou directement sur le pool.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create(&self, ctx: &Context, account: &Account) -> Result<()>;

    /// Dans une transaction, la ligne est verrouillée jusqu'au commit.
    async fn find_by_id(&self, ctx: &Context, id: &AccountId) -> Result<Option<Account>>;

    async fn save_balance(&self, ctx: &Context, account: &Account) -> Result<()>;
}
