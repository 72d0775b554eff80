mod postgres_migrations;

pub use postgres_migrations::run_ledger_postgres_migrations;
