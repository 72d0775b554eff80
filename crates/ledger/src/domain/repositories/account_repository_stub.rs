// crates/ledger/src/domain/repositories/account_repository_stub.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use transactor::domain::context::Context;
use transactor::domain::transaction::extract;

use crate::domain::entities::Account;
use crate::domain::repositories::AccountRepository;
use crate::domain::value_objects::AccountId;
use crate::errors::{LedgerError, Result};

#[derive(Default)]
pub struct AccountRepositoryStub {
    pub accounts: Arc<Mutex<HashMap<AccountId, Account>>>,
    /// Pour chaque écriture : vrai si elle a eu lieu dans une transaction
    pub writes: Arc<Mutex<Vec<bool>>>,
}

impl AccountRepositoryStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&self, account: Account) {
        self.accounts.lock().unwrap().insert(*account.id(), account);
    }

    pub fn balance_of(&self, id: &AccountId) -> Option<i64> {
        self.accounts.lock().unwrap().get(id).map(Account::balance)
    }

    fn track(&self, ctx: &Context) {
        self.writes.lock().unwrap().push(extract(ctx).is_some());
    }
}

#[async_trait]
impl AccountRepository for AccountRepositoryStub {
    async fn create(&self, ctx: &Context, account: &Account) -> Result<()> {
        self.track(ctx);
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(account.id()) {
            return Err(LedgerError::AlreadyExists {
                entity: "Account",
                field: "id",
                value: account.id().to_string(),
            });
        }
        accounts.insert(*account.id(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, _ctx: &Context, id: &AccountId) -> Result<Option<Account>> {
        Ok(self.accounts.lock().unwrap().get(id).cloned())
    }

    async fn save_balance(&self, ctx: &Context, account: &Account) -> Result<()> {
        self.track(ctx);
        match self.accounts.lock().unwrap().get_mut(account.id()) {
            Some(stored) => {
                *stored = account.clone();
                Ok(())
            }
            None => Err(LedgerError::NotFound {
                entity: "Account",
                id: account.id().to_string(),
            }),
        }
    }
}
