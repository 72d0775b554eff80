// crates/ledger/src/errors/mod.rs

mod ledger_error;
mod result;

pub use ledger_error::LedgerError;
pub use result::Result;
