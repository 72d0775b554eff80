// crates/transactor/src/infrastructure/postgres/utils/postgres_test_context.rs

use sqlx::{Executor, PgPool};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres as PostgresImage;

use crate::errors::{Result, TxError};
use crate::infrastructure::postgres::factories::PostgresContext;
use crate::infrastructure::postgres::runners::PostgresRunnerResolver;
use crate::infrastructure::postgres::transactions::PostgresTransactor;
use crate::infrastructure::postgres::utils::PostgresTestContextBuilder;

/// Postgres jetable dans un conteneur. Le conteneur vit aussi longtemps que le contexte.
pub struct PostgresTestContext {
    context: PostgresContext,
    _container: ContainerAsync<PostgresImage>,
}

impl PostgresTestContext {
    pub fn builder() -> PostgresTestContextBuilder {
        PostgresTestContextBuilder::new()
    }

    pub(crate) async fn restore(builder: PostgresTestContextBuilder) -> Result<Self> {
        // 1. Démarrage container
        let container = PostgresImage::default()
            .with_user(&builder.user)
            .with_password(&builder.password)
            .with_db_name(&builder.db_name)
            .with_name(&builder.image_name)
            .with_tag(&builder.image_tag)
            .start()
            .await
            .map_err(TxError::other)?;

        let host_port = container
            .get_host_port_ipv4(5432)
            .await
            .map_err(TxError::other)?;
        let conn_str = format!(
            "postgres://{}:{}@127.0.0.1:{}/{}",
            builder.user, builder.password, host_port, builder.db_name
        );

        // 2. Pool applicatif
        let mut context_builder = PostgresContext::builder_raw().with_url(&conn_str);
        if let Some(config) = builder.config {
            context_builder = context_builder.with_config(config);
        }
        let context = context_builder.build().await?;

        // 3. Schéma de test
        for sql in &builder.schema {
            context.pool().execute(sql.as_str()).await?;
        }

        tracing::info!("🐘 Postgres test container ready on port {}", host_port);
        Ok(Self {
            context,
            _container: container,
        })
    }

    pub fn pool(&self) -> PgPool {
        self.context.pool()
    }

    pub fn transactor(&self) -> PostgresTransactor {
        self.context.transactor()
    }

    pub fn runner_resolver(&self) -> PostgresRunnerResolver {
        self.context.runner_resolver()
    }
}
