// crates/transactor/src/domain/mod.rs

pub mod context;
pub mod transaction;
