// crates/ledger/src/domain/value_objects/amount.rs

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// Montant strictement positif, en centimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(i64);

impl Amount {
    pub fn try_new(cents: i64) -> Result<Self> {
        if cents <= 0 {
            return Err(LedgerError::Validation {
                field: "amount",
                reason: format!("must be strictly positive, got {cents}"),
            });
        }
        Ok(Self(cents))
    }

    /// Reconstruction depuis la base, déjà validée à l'écriture
    pub fn from_raw(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }
}
