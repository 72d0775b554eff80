// crates/transactor/src/errors/error.rs

use thiserror::Error;

use crate::domain::transaction::Backend;
use crate::errors::ContextError;

#[derive(Error, Debug)]
pub enum TxError {
    /// Opération sur un handle déjà finalisé (commit, rollback ou release).
    #[error("transaction already closed")]
    TxClosed,

    /// Le contexte appelant a été annulé ou a dépassé sa deadline.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// Erreur brute du driver Postgres, remontée telle quelle
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    Postgres(#[from] sqlx::Error),

    /// Erreur brute du driver MongoDB, remontée telle quelle
    #[cfg(feature = "mongo")]
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    /// Le contexte porte déjà une transaction d'un autre backend.
    #[error("transaction backend mismatch: expected {expected}, found {found}")]
    BackendMismatch { expected: Backend, found: Backend },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TxError {
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Other(err.into())
    }

    /// Vrai si l'erreur signale une transaction déjà terminée.
    ///
    /// Utilisé par le finalize pour ne pas masquer l'erreur d'origine du unit of work
    /// (cas typique : le backend a déjà fait le rollback lui-même).
    pub fn is_tx_closed(&self) -> bool {
        match self {
            Self::TxClosed => true,
            #[cfg(feature = "mongo")]
            Self::Mongo(err) => matches!(*err.kind, mongodb::error::ErrorKind::Transaction { .. }),
            _ => false,
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Context(_))
    }

    /// Label `TransientTransactionError` : toute la transaction peut être rejouée.
    pub fn is_transient_transaction_error(&self) -> bool {
        match self {
            #[cfg(feature = "mongo")]
            Self::Mongo(err) => err.contains_label(mongodb::error::TRANSIENT_TRANSACTION_ERROR),
            _ => false,
        }
    }

    /// Label `UnknownTransactionCommitResult` : seul le commit peut être rejoué.
    pub fn is_unknown_commit_result(&self) -> bool {
        match self {
            #[cfg(feature = "mongo")]
            Self::Mongo(err) => {
                err.contains_label(mongodb::error::UNKNOWN_TRANSACTION_COMMIT_RESULT)
            }
            _ => false,
        }
    }

    /// Code serveur 50 (MaxTimeMSExpired) : un commit rejoué échouerait de la même façon.
    pub fn is_max_time_expired(&self) -> bool {
        match self {
            #[cfg(feature = "mongo")]
            Self::Mongo(err) => matches!(
                *err.kind,
                mongodb::error::ErrorKind::Command(ref command) if command.code == 50
            ),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_closed_is_classified_by_kind() {
        assert!(TxError::TxClosed.is_tx_closed());
        assert!(!TxError::Configuration("transaction already closed".into()).is_tx_closed());
        assert!(!TxError::other("transaction already closed").is_tx_closed());
    }

    #[test]
    fn test_context_errors_are_cancellations() {
        let err: TxError = ContextError::DeadlineExceeded.into();
        assert!(err.is_canceled());
        assert_eq!(err.to_string(), "context deadline exceeded");
        assert!(!err.is_tx_closed());
    }

    #[test]
    fn test_backend_mismatch_message() {
        let err = TxError::BackendMismatch {
            expected: Backend::Postgres,
            found: Backend::Mongo,
        };
        assert_eq!(
            err.to_string(),
            "transaction backend mismatch: expected postgres, found mongo"
        );
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn test_postgres_errors_are_transparent() {
        let err: TxError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.to_string(), sqlx::Error::RowNotFound.to_string());
        assert!(!err.is_transient_transaction_error());
        assert!(!err.is_tx_closed());
    }
}
