// crates/transactor/src/infrastructure/mongo/runners/mod.rs

mod mongo_query_runner;
mod mongo_runner_resolver;

pub use mongo_query_runner::MongoQueryRunner;
pub use mongo_runner_resolver::MongoRunnerResolver;
