// crates/ledger/src/application/open_account/open_account_use_case.rs

use std::sync::Arc;

use transactor::domain::context::Context;

use crate::application::open_account::OpenAccountCommand;
use crate::domain::entities::Account;
use crate::domain::repositories::AccountRepository;
use crate::domain::value_objects::{Amount, OwnerName};
use crate::errors::Result;

/// Une seule écriture : pas besoin de transaction, le repository tourne sur le pool.
pub struct OpenAccountUseCase {
    account_repo: Arc<dyn AccountRepository>,
}

impl OpenAccountUseCase {
    pub fn new(account_repo: Arc<dyn AccountRepository>) -> Self {
        Self { account_repo }
    }

    pub async fn execute(&self, ctx: &Context, command: OpenAccountCommand) -> Result<Account> {
        let owner = OwnerName::try_new(command.owner)?;
        let deposit = match command.initial_deposit {
            0 => None,
            cents => Some(Amount::try_new(cents)?),
        };

        let account = Account::open(owner, deposit);
        self.account_repo.create(ctx, &account).await?;

        tracing::info!(
            account_id = %account.id(),
            balance = account.balance(),
            "🏦 Account opened"
        );
        Ok(account)
    }
}
