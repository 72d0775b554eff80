mod mongo_error_mapper;

pub use mongo_error_mapper::MongoErrorExt;
