// crates/ledger/src/infrastructure/mongo/mod.rs

pub mod documents;
pub mod mappers;
pub mod repositories;
