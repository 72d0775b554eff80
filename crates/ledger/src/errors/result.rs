// crates/ledger/src/errors/result.rs

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;
