// crates/transactor/src/infrastructure/postgres/runners/mod.rs

mod postgres_batch;
mod postgres_copy;
mod postgres_query_runner;
mod postgres_runner_resolver;

pub use postgres_batch::PostgresBatch;
pub use postgres_query_runner::PostgresQueryRunner;
pub use postgres_runner_resolver::PostgresRunnerResolver;
