// crates/ledger/src/infrastructure/mongo/documents/mongo_transfer_document.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Transfer;
use crate::domain::value_objects::{AccountId, Amount, TransferId};
use crate::errors::{LedgerError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoTransferDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: i64,
}

impl TryFrom<MongoTransferDocument> for Transfer {
    type Error = LedgerError;

    fn try_from(doc: MongoTransferDocument) -> Result<Self> {
        let id = Uuid::parse_str(&doc.id).map_err(|_| LedgerError::Validation {
            field: "transfer_id",
            reason: format!("'{}' is not a valid UUID", doc.id),
        })?;
        Ok(Transfer::restore(
            TransferId::from_uuid(id),
            AccountId::try_new(&doc.from_account_id)?,
            AccountId::try_new(&doc.to_account_id)?,
            Amount::from_raw(doc.amount),
        ))
    }
}

impl From<&Transfer> for MongoTransferDocument {
    fn from(transfer: &Transfer) -> Self {
        Self {
            id: transfer.id().to_string(),
            from_account_id: transfer.from_account().to_string(),
            to_account_id: transfer.to_account().to_string(),
            amount: transfer.amount().cents(),
        }
    }
}
