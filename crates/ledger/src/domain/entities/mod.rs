// crates/ledger/src/domain/entities/mod.rs

mod account;
mod transfer;

pub use account::Account;
pub use transfer::Transfer;
