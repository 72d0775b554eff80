// crates/transactor/src/infrastructure/mongo/mod.rs

pub mod factories;
pub mod runners;
pub mod transactions;
pub mod utils;

pub use factories::{MongoConfig, MongoContext, MongoContextBuilder};
pub use runners::{MongoQueryRunner, MongoRunnerResolver};
pub use transactions::{MongoSession, MongoTransaction, MongoTransactionExt, MongoTransactor};
