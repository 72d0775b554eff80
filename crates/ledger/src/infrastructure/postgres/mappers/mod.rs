mod postgres_error_mapper;

pub use postgres_error_mapper::PostgresErrorExt;
