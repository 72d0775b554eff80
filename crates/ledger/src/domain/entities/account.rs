// crates/ledger/src/domain/entities/account.rs

use crate::domain::value_objects::{AccountId, Amount, OwnerName};
use crate::errors::{LedgerError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    owner: OwnerName,
    balance: i64,
}

impl Account {
    pub fn open(owner: OwnerName, initial_deposit: Option<Amount>) -> Self {
        Self {
            id: AccountId::new(),
            owner,
            balance: initial_deposit.map(|a| a.cents()).unwrap_or(0),
        }
    }

    /// Reconstruction depuis la persistance
    pub fn restore(id: AccountId, owner: OwnerName, balance: i64) -> Self {
        Self { id, owner, balance }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn owner(&self) -> &OwnerName {
        &self.owner
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn debit(&mut self, amount: Amount) -> Result<()> {
        if self.balance < amount.cents() {
            return Err(LedgerError::InsufficientFunds {
                account_id: self.id.to_string(),
                balance: self.balance,
                requested: amount.cents(),
            });
        }
        self.balance -= amount.cents();
        Ok(())
    }

    pub fn credit(&mut self, amount: Amount) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(amount.cents())
            .ok_or_else(|| LedgerError::Validation {
                field: "balance",
                reason: "overflow".to_string(),
            })?;
        Ok(())
    }
}
