// crates/ledger/src/application/get_account/get_account_use_case.rs

use std::sync::Arc;

use transactor::domain::context::Context;

use crate::application::get_account::GetAccountResponse;
use crate::domain::repositories::{AccountRepository, TransferRepository};
use crate::domain::value_objects::AccountId;
use crate::errors::{LedgerError, Result};

pub struct GetAccountUseCase {
    account_repo: Arc<dyn AccountRepository>,
    transfer_repo: Arc<dyn TransferRepository>,
}

impl GetAccountUseCase {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        transfer_repo: Arc<dyn TransferRepository>,
    ) -> Self {
        Self { account_repo, transfer_repo }
    }

    pub async fn execute(
        &self,
        ctx: &Context,
        account_id: &AccountId,
    ) -> Result<GetAccountResponse> {
        let account = self
            .account_repo
            .find_by_id(ctx, account_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound {
                entity: "Account",
                id: account_id.to_string(),
            })?;

        let transfers = self.transfer_repo.list_for_account(ctx, account_id).await?;

        Ok(GetAccountResponse { account, transfers })
    }
}
