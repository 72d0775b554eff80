// crates/ledger/src/domain/repositories/transfer_repository.rs

use async_trait::async_trait;
use transactor::domain::context::Context;

use crate::domain::entities::Transfer;
use crate::domain::value_objects::AccountId;
use crate::errors::Result;

#[async_trait]
pub trait TransferRepository: Send + Sync {
    async fn record(&self, ctx: &Context, transfer: &Transfer) -> Result<()>;

    /// Virements émis ou reçus par le compte, du plus ancien au plus récent.
    async fn list_for_account(
        &self,
        ctx: &Context,
        account_id: &AccountId,
    ) -> Result<Vec<Transfer>>;
}
