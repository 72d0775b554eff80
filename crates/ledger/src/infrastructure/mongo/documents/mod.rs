mod mongo_account_document;
mod mongo_transfer_document;

pub use mongo_account_document::MongoAccountDocument;
pub use mongo_transfer_document::MongoTransferDocument;
