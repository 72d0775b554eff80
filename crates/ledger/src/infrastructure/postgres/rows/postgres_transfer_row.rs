// crates/ledger/src/infrastructure/postgres/rows/postgres_transfer_row.rs

use uuid::Uuid;

use crate::domain::entities::Transfer;
use crate::domain::value_objects::{AccountId, Amount, TransferId};

#[derive(Debug, sqlx::FromRow)]
pub struct PostgresTransferRow {
    pub id: Uuid,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
    pub amount: i64,
}

impl From<PostgresTransferRow> for Transfer {
    fn from(row: PostgresTransferRow) -> Self {
        Transfer::restore(
            TransferId::from_uuid(row.id),
            AccountId::from_uuid(row.from_account_id),
            AccountId::from_uuid(row.to_account_id),
            Amount::from_raw(row.amount),
        )
    }
}
