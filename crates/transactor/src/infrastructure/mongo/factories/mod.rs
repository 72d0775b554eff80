// crates/transactor/src/infrastructure/mongo/factories/mod.rs

mod mongo_config;
mod mongo_context;
mod mongo_context_builder;

pub use mongo_config::MongoConfig;
pub use mongo_context::MongoContext;
pub use mongo_context_builder::MongoContextBuilder;
