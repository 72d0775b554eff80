// crates/ledger/src/application/transfer_funds/transfer_funds_use_case.rs

use std::sync::Arc;

use transactor::domain::context::Context;
use transactor::domain::transaction::{Transactor, TransactorExt};

use crate::application::transfer_funds::TransferFundsCommand;
use crate::domain::entities::{Account, Transfer};
use crate::domain::repositories::{AccountRepository, TransferRepository};
use crate::domain::value_objects::{AccountId, Amount};
use crate::errors::{LedgerError, Result};

pub struct TransferFundsUseCase {
    account_repo: Arc<dyn AccountRepository>,
    transfer_repo: Arc<dyn TransferRepository>,
    transactor: Arc<dyn Transactor<LedgerError>>,
}

impl TransferFundsUseCase {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        transfer_repo: Arc<dyn TransferRepository>,
        transactor: Arc<dyn Transactor<LedgerError>>,
    ) -> Self {
        Self { account_repo, transfer_repo, transactor }
    }

    /// Débit, crédit et trace du virement forment une seule unité :
    /// une erreur à n'importe quelle étape annule les trois.
    pub async fn execute(&self, ctx: &Context, command: TransferFundsCommand) -> Result<Transfer> {
        let amount = Amount::try_new(command.amount)?;
        let transfer = Transfer::new(command.from, command.to, amount)?;

        self.transactor
            .within_transaction(ctx.clone(), |ctx| {
                let accounts = self.account_repo.clone();
                let transfers = self.transfer_repo.clone();
                let transfer = transfer.clone();

                async move {
                    // 1. VERROUILLAGE (ordre stable)
                    let (first_id, second_id) = transfer.lock_order();
                    let first = load(accounts.as_ref(), &ctx, &first_id).await?;
                    let second = load(accounts.as_ref(), &ctx, &second_id).await?;
                    let (mut from, mut to) = if first.id() == transfer.from_account() {
                        (first, second)
                    } else {
                        (second, first)
                    };

                    // 2. RÈGLES MÉTIER
                    from.debit(transfer.amount())?;
                    to.credit(transfer.amount())?;

                    // 3. PERSISTANCE
                    accounts.save_balance(&ctx, &from).await?;
                    accounts.save_balance(&ctx, &to).await?;
                    transfers.record(&ctx, &transfer).await?;
                    Ok::<(), LedgerError>(())
                }
            })
            .await?;

        tracing::info!(
            transfer_id = %transfer.id(),
            from = %transfer.from_account(),
            to = %transfer.to_account(),
            amount = transfer.amount().cents(),
            "💸 Transfer committed"
        );
        Ok(transfer)
    }
}

async fn load(accounts: &dyn AccountRepository, ctx: &Context, id: &AccountId) -> Result<Account> {
    accounts
        .find_by_id(ctx, id)
        .await?
        .ok_or_else(|| LedgerError::NotFound {
            entity: "Account",
            id: id.to_string(),
        })
}
