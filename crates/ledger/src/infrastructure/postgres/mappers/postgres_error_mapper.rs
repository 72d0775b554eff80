// crates/ledger/src/infrastructure/postgres/mappers/postgres_error_mapper.rs

use std::fmt::Display;

use transactor::errors::TxError;

use crate::errors::LedgerError;

pub trait PostgresErrorExt<T> {
    /// Violation d'unicité (23505) → `AlreadyExists`, le reste est remonté tel quel.
    fn map_unique_violation(
        self,
        entity: &'static str,
        field: &'static str,
        value: impl Display,
    ) -> Result<T, LedgerError>;
}

impl<T> PostgresErrorExt<T> for Result<T, TxError> {
    fn map_unique_violation(
        self,
        entity: &'static str,
        field: &'static str,
        value: impl Display,
    ) -> Result<T, LedgerError> {
        self.map_err(|err| {
            if is_unique_violation(&err) {
                LedgerError::AlreadyExists {
                    entity,
                    field,
                    value: value.to_string(),
                }
            } else {
                LedgerError::Transaction(err)
            }
        })
    }
}

fn is_unique_violation(err: &TxError) -> bool {
    match err {
        TxError::Postgres(sqlx::Error::Database(db_err)) => {
            db_err.code().map(|c| c == "23505").unwrap_or(false)
        }
        _ => false,
    }
}
