mod postgres_account_repository;
mod postgres_transfer_repository;

pub use postgres_account_repository::PostgresAccountRepository;
pub use postgres_transfer_repository::PostgresTransferRepository;
