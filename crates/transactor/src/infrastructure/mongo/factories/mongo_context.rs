// crates/transactor/src/infrastructure/mongo/factories/mongo_context.rs

use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use crate::errors::Result;
use crate::infrastructure::mongo::factories::MongoContextBuilder;
use crate::infrastructure::mongo::runners::MongoRunnerResolver;
use crate::infrastructure::mongo::transactions::MongoTransactor;

pub struct MongoContext {
    client: Client,
    database: String,
}

impl MongoContext {
    pub fn builder() -> Result<MongoContextBuilder> {
        MongoContextBuilder::new()
    }

    pub fn builder_raw() -> MongoContextBuilder {
        MongoContextBuilder::default()
    }

    pub fn client(&self) -> Client {
        self.client.clone()
    }

    pub fn database(&self) -> Database {
        self.client.database(&self.database)
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database().collection(name)
    }

    pub fn transactor(&self) -> MongoTransactor {
        MongoTransactor::new(self.client())
    }

    pub fn runner_resolver(&self) -> MongoRunnerResolver {
        MongoRunnerResolver::new(self.client())
    }

    pub(crate) async fn restore(builder: MongoContextBuilder) -> Result<Self> {
        let mut options = ClientOptions::parse(&builder.uri).await?;
        options.max_pool_size = Some(builder.max_pool_size);
        options.server_selection_timeout = Some(builder.server_selection_timeout);
        options.app_name = builder.app_name;

        let client = Client::with_options(options)?;
        tracing::info!(database = %builder.database, "✅ Mongo client ready");

        Ok(Self {
            client,
            database: builder.database,
        })
    }
}
