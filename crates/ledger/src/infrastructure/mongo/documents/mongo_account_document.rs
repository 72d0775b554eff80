// crates/ledger/src/infrastructure/mongo/documents/mongo_account_document.rs

use serde::{Deserialize, Serialize};

use crate::domain::entities::Account;
use crate::domain::value_objects::{AccountId, OwnerName};
use crate::errors::{LedgerError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoAccountDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner: String,
    pub balance: i64,
}

impl TryFrom<MongoAccountDocument> for Account {
    type Error = LedgerError;

    fn try_from(doc: MongoAccountDocument) -> Result<Self> {
        Ok(Account::restore(
            AccountId::try_new(&doc.id)?,
            OwnerName::from_raw(doc.owner),
            doc.balance,
        ))
    }
}

impl From<&Account> for MongoAccountDocument {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().to_string(),
            owner: account.owner().as_str().to_string(),
            balance: account.balance(),
        }
    }
}
