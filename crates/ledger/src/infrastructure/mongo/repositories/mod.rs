mod mongo_account_repository;
mod mongo_transfer_repository;

pub use mongo_account_repository::MongoAccountRepository;
pub use mongo_transfer_repository::MongoTransferRepository;
