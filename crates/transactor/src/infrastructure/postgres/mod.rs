// crates/transactor/src/infrastructure/postgres/mod.rs

pub mod factories;
pub mod runners;
pub mod transactions;
pub mod utils;

pub use factories::{PostgresConfig, PostgresContext, PostgresContextBuilder};
pub use runners::{PostgresBatch, PostgresQueryRunner, PostgresRunnerResolver};
pub use transactions::{
    PostgresAccessMode, PostgresIsolationLevel, PostgresTransaction, PostgresTransactionExt,
    PostgresTransactor, PostgresTxOptions,
};
