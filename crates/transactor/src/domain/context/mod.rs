// crates/transactor/src/domain/context/mod.rs

mod context;

pub use context::{Context, ContextKey};
