// crates/transactor/src/infrastructure/postgres/transactions/mod.rs

mod postgres_transaction;
mod postgres_transactor;
mod postgres_tx_options;

pub use postgres_transaction::{PostgresTransaction, PostgresTransactionExt};
pub use postgres_transactor::PostgresTransactor;
pub use postgres_tx_options::{PostgresAccessMode, PostgresIsolationLevel, PostgresTxOptions};
