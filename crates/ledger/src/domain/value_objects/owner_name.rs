// crates/ledger/src/domain/value_objects/owner_name.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

const MAX_LEN: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerName(String);

impl OwnerName {
    pub fn try_new(name: impl Into<String>) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(LedgerError::Validation {
                field: "owner",
                reason: "cannot be empty".to_string(),
            });
        }
        if name.chars().count() > MAX_LEN {
            return Err(LedgerError::Validation {
                field: "owner",
                reason: format!("cannot exceed {MAX_LEN} characters"),
            });
        }
        Ok(Self(name))
    }

    pub fn from_raw(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
