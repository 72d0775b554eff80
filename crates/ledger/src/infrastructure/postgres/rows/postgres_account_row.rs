// crates/ledger/src/infrastructure/postgres/rows/postgres_account_row.rs

use uuid::Uuid;

use crate::domain::entities::Account;
use crate::domain::value_objects::{AccountId, OwnerName};

#[derive(Debug, sqlx::FromRow)]
pub struct PostgresAccountRow {
    pub id: Uuid,
    pub owner: String,
    pub balance: i64,
}

impl From<PostgresAccountRow> for Account {
    fn from(row: PostgresAccountRow) -> Self {
        Account::restore(AccountId::from_uuid(row.id), OwnerName::from_raw(row.owner), row.balance)
    }
}

impl From<&Account> for PostgresAccountRow {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().as_uuid(),
            owner: account.owner().as_str().to_string(),
            balance: account.balance(),
        }
    }
}
