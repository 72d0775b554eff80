// crates/ledger/src/infrastructure/mongo/mappers/mongo_error_mapper.rs

use std::fmt::Display;

use mongodb::error::{ErrorKind, WriteFailure};
use transactor::errors::TxError;

use crate::errors::LedgerError;

const DUPLICATE_KEY: i32 = 11000;

pub trait MongoErrorExt<T> {
    /// Clé dupliquée (11000) → `AlreadyExists`, le reste est remonté tel quel.
    fn map_duplicate_key(
        self,
        entity: &'static str,
        field: &'static str,
        value: impl Display,
    ) -> Result<T, LedgerError>;
}

impl<T> MongoErrorExt<T> for Result<T, TxError> {
    fn map_duplicate_key(
        self,
        entity: &'static str,
        field: &'static str,
        value: impl Display,
    ) -> Result<T, LedgerError> {
        self.map_err(|err| {
            if is_duplicate_key(&err) {
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

fn is_duplicate_key(err: &TxError) -> bool {
    match err {
        TxError::Mongo(mongo_err) => matches!(
            *mongo_err.kind,
            ErrorKind::Write(WriteFailure::WriteError(ref write_err))
                if write_err.code == DUPLICATE_KEY
        ),
        _ => false,
    }
}
