// crates/ledger/src/infrastructure/postgres/utils/postgres_migrations.rs

use transactor::errors::TxError;

use crate::errors::Result;

pub const LEDGER_SCHEMA: &str =
    include_str!("../../../../migrations/postgres/202601010000_ledger.sql");

/// Schéma idempotent, exécuté d'un bloc (plusieurs instructions).
pub async fn run_ledger_postgres_migrations(pool: &sqlx::PgPool) -> Result<()> {
    sqlx::raw_sql(LEDGER_SCHEMA)
        .execute(pool)
        .await
        .map_err(TxError::from)?;
    tracing::info!("✅ Ledger migrations applied (via include_str)");
    Ok(())
}
