// crates/transactor/src/infrastructure/mongo/transactions/mod.rs

mod mongo_retry_policy;
mod mongo_session;
mod mongo_transaction;
mod mongo_transactor;

pub use mongo_session::MongoSession;
pub use mongo_transaction::{MongoTransaction, MongoTransactionExt};
pub use mongo_transactor::MongoTransactor;
