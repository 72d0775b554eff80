// crates/ledger/src/infrastructure/mod.rs

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "mongo")]
pub mod mongo;
