// crates/transactor/src/errors/mod.rs

mod context_error;
mod error;
mod result;

pub use context_error::ContextError;
pub use error::TxError;
pub use result::Result;
