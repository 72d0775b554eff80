mod postgres_account_row;
mod postgres_transfer_row;

pub use postgres_account_row::PostgresAccountRow;
pub use postgres_transfer_row::PostgresTransferRow;
