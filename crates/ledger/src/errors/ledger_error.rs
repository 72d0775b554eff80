// crates/ledger/src/errors/ledger_error.rs

use thiserror::Error;
use transactor::domain::transaction::UnitOfWorkError;
use transactor::errors::TxError;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Validation failed for field '{field}': {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    #[error("{entity} not found with id '{id}'")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    #[error("{entity} already exists with {field} = '{value}'")]
    AlreadyExists {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Règle métier : un débit ne peut pas rendre le solde négatif
    #[error(
        "Insufficient funds on account '{account_id}': balance {balance}, requested {requested}"
    )]
    InsufficientFunds {
        account_id: String,
        balance: i64,
        requested: i64,
    },

    /// Erreur de la couche transactionnelle ou du driver, conservée intacte
    #[error(transparent)]
    Transaction(#[from] TxError),
}

impl LedgerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

impl UnitOfWorkError for LedgerError {
    fn tx_error(&self) -> Option<&TxError> {
        match self {
            Self::Transaction(err) => Some(err),
            _ => None,
        }
    }
}
