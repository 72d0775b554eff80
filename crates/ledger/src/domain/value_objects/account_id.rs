// crates/ledger/src/domain/value_objects/account_id.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    /// UUID v7 : séquentiel, donc stable pour l'ordre de verrouillage
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn try_new(id: impl AsRef<str>) -> Result<Self> {
        Self::from_str(id.as_ref())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for AccountId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| LedgerError::Validation {
                field: "account_id",
                reason: format!("'{s}' is not a valid UUID"),
            })
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let id = AccountId::new();
        assert_eq!(AccountId::try_new(id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_invalid_uuid_is_rejected() {
        let err = AccountId::try_new("not-a-uuid").unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field: "account_id", .. }));
    }
}
