// crates/transactor/src/infrastructure/mongo/utils/mod.rs

#[cfg(feature = "test-utils")]
mod mongo_test_context;

#[cfg(feature = "test-utils")]
pub use mongo_test_context::{MongoTestContext, MongoTestContextBuilder};
