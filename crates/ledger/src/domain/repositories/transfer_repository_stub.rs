// crates/ledger/src/domain/repositories/transfer_repository_stub.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use transactor::domain::context::Context;
use transactor::domain::transaction::extract;
use transactor::errors::TxError;

use crate::domain::entities::Transfer;
use crate::domain::repositories::TransferRepository;
use crate::domain::value_objects::AccountId;
use crate::errors::Result;

#[derive(Default)]
pub struct TransferRepositoryStub {
    pub transfers: Arc<Mutex<Vec<Transfer>>>,
    pub recorded_in_transaction: Arc<Mutex<Vec<bool>>>,
    /// Simule une panne du stockage au moment d'enregistrer le virement
    pub fail_with: Arc<Mutex<Option<String>>>,
}

impl TransferRepositoryStub {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransferRepository for TransferRepositoryStub {
    async fn record(&self, ctx: &Context, transfer: &Transfer) -> Result<()> {
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(TxError::other(message).into());
        }
        self.recorded_in_transaction.lock().unwrap().push(extract(ctx).is_some());
        self.transfers.lock().unwrap().push(transfer.clone());
        Ok(())
    }

    async fn list_for_account(
        &self,
        _ctx: &Context,
        account_id: &AccountId,
    ) -> Result<Vec<Transfer>> {
        Ok(self
            .transfers
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.from_account() == account_id || t.to_account() == account_id)
            .cloned()
            .collect())
    }
}
