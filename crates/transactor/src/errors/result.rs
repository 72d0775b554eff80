// crates/transactor/src/errors/result.rs

use crate::errors::TxError;

/// Result utilisé par toute la couche transactionnelle (contexte, handles, runners).
pub type Result<T> = std::result::Result<T, TxError>;
