// crates/transactor/src/infrastructure/utils/mod.rs

mod env;

pub(crate) use env::{env_or, required};
