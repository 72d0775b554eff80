// crates/ledger/src/domain/entities/transfer.rs

use crate::domain::value_objects::{AccountId, Amount, TransferId};
use crate::errors::{LedgerError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    id: TransferId,
    from: AccountId,
    to: AccountId,
    amount: Amount,
}

impl Transfer {
    pub fn new(from: AccountId, to: AccountId, amount: Amount) -> Result<Self> {
        if from == to {
            return Err(LedgerError::Validation {
                field: "to",
                reason: "source and destination accounts must differ".to_string(),
            });
        }
        Ok(Self {
            id: TransferId::new(),
            from,
            to,
            amount,
        })
    }

    pub fn restore(id: TransferId, from: AccountId, to: AccountId, amount: Amount) -> Self {
        Self { id, from, to, amount }
    }

    pub fn id(&self) -> &TransferId {
        &self.id
    }

    pub fn from_account(&self) -> &AccountId {
        &self.from
    }

    pub fn to_account(&self) -> &AccountId {
        &self.to
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Comptes dans l'ordre de verrouillage (ids croissants), pour que deux
    /// virements croisés ne se bloquent pas mutuellement.
    pub fn lock_order(&self) -> (AccountId, AccountId) {
        if self.from < self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}
