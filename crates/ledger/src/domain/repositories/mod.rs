// crates/ledger/src/domain/repositories/mod.rs

mod account_repository;
mod transfer_repository;

pub use account_repository::AccountRepository;
pub use transfer_repository::TransferRepository;

#[cfg(test)]
mod account_repository_stub;
#[cfg(test)]
mod transfer_repository_stub;

#[cfg(test)]
pub use account_repository_stub::AccountRepositoryStub;
#[cfg(test)]
pub use transfer_repository_stub::TransferRepositoryStub;
