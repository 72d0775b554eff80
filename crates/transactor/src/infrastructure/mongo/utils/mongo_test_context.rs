// crates/transactor/src/infrastructure/mongo/utils/mongo_test_context.rs

use mongodb::{Client, Collection, Database};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo as MongoImage;

use crate::errors::{Result, TxError};
use crate::infrastructure::mongo::factories::MongoContext;
use crate::infrastructure::mongo::runners::MongoRunnerResolver;
use crate::infrastructure::mongo::transactions::MongoTransactor;

pub struct MongoTestContextBuilder {
    image_tag: String,
    database: String,
}

impl Default for MongoTestContextBuilder {
    fn default() -> Self {
        Self {
            image_tag: "7".to_string(),
            database: "test_db".to_string(),
        }
    }
}

impl MongoTestContextBuilder {
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.image_tag = tag.into();
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub async fn build(self) -> Result<MongoTestContext> {
        MongoTestContext::restore(self).await
    }
}

/// MongoDB en replica set à un nœud : les transactions l'exigent.
pub struct MongoTestContext {
    context: MongoContext,
    _container: ContainerAsync<MongoImage>,
}

impl MongoTestContext {
    pub fn builder() -> MongoTestContextBuilder {
        MongoTestContextBuilder::default()
    }

    async fn restore(builder: MongoTestContextBuilder) -> Result<Self> {
        let container = MongoImage::repl_set()
            .with_tag(&builder.image_tag)
            .start()
            .await
            .map_err(TxError::other)?;

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .map_err(TxError::other)?;
        let uri = format!("mongodb://127.0.0.1:{host_port}/?directConnection=true");

        let context = MongoContext::builder_raw()
            .with_uri(uri)
            .with_database(&builder.database)
            .build()
            .await?;

        tracing::info!("🍃 Mongo test replica set ready on port {}", host_port);
        Ok(Self {
            context,
            _container: container,
        })
    }

    pub fn client(&self) -> Client {
        self.context.client()
    }

    pub fn database(&self) -> Database {
        self.context.database()
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.context.collection(name)
    }

    pub fn transactor(&self) -> MongoTransactor {
        self.context.transactor()
    }

    pub fn runner_resolver(&self) -> MongoRunnerResolver {
        self.context.runner_resolver()
    }
}
