// crates/transactor/src/infrastructure/mod.rs

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "mongo")]
pub mod mongo;

#[cfg(any(feature = "postgres", feature = "mongo"))]
pub(crate) mod utils;
