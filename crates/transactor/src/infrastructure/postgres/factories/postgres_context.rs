// crates/transactor/src/infrastructure/postgres/factories/postgres_context.rs

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::errors::{Result, TxError};
use crate::infrastructure::postgres::factories::PostgresContextBuilder;
use crate::infrastructure::postgres::runners::PostgresRunnerResolver;
use crate::infrastructure::postgres::transactions::PostgresTransactor;

pub struct PostgresContext {
    pool: PgPool,
}

impl PostgresContext {
    pub fn builder() -> Result<PostgresContextBuilder> {
        PostgresContextBuilder::new()
    }

    pub fn builder_raw() -> PostgresContextBuilder {
        PostgresContextBuilder::default()
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Transactor et resolver construits sur le même pool.
    pub fn transactor(&self) -> PostgresTransactor {
        PostgresTransactor::new(self.pool())
    }

    pub fn runner_resolver(&self) -> PostgresRunnerResolver {
        PostgresRunnerResolver::new(self.pool())
    }

    pub(crate) async fn restore(builder: PostgresContextBuilder) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(builder.max_connections)
            .min_connections(builder.min_connections)
            .acquire_timeout(builder.connect_timeout)
            .connect(&builder.url)
            .await
            .map_err(|e| {
                tracing::error!("❌ Postgres connection failed: {}", e);
                TxError::from(e)
            })?;

        tracing::info!(
            max_connections = builder.max_connections,
            "✅ Postgres pool ready"
        );

        Ok(Self { pool })
    }
}
