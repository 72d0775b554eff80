// crates/ledger/src/application/mod.rs

pub mod get_account;
pub mod open_account;
pub mod transfer_funds;
