// crates/ledger/src/infrastructure/postgres/mod.rs

pub mod mappers;
pub mod repositories;
pub mod rows;
pub mod utils;
