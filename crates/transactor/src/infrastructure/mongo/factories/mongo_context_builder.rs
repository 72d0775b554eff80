// crates/transactor/src/infrastructure/mongo/factories/mongo_context_builder.rs

use std::time::Duration;

use crate::errors::Result;
use crate::infrastructure::mongo::factories::{MongoConfig, MongoContext};
use crate::infrastructure::utils::{env_or, required};

pub struct MongoContextBuilder {
    pub(crate) uri: String,
    pub(crate) database: String,
    pub(crate) max_pool_size: u32,
    pub(crate) server_selection_timeout: Duration,
    pub(crate) app_name: Option<String>,
}

impl Default for MongoContextBuilder {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017/?directConnection=true".to_string(),
            database: "app".to_string(),
            max_pool_size: 10,
            server_selection_timeout: Duration::from_secs(5),
            app_name: None,
        }
    }
}

impl MongoContextBuilder {
    /// `MONGODB_URI` et `MONGODB_DATABASE` sont obligatoires.
    pub fn new() -> Result<Self> {
        let uri = required("MONGODB_URI")?;
        let database = required("MONGODB_DATABASE")?;

        let max_pool_size = env_or("MONGODB_MAX_POOL_SIZE", 10)?;
        let timeout_secs = env_or("MONGODB_SERVER_SELECTION_TIMEOUT", 5)?;

        Ok(Self {
            uri,
            database,
            max_pool_size,
            server_selection_timeout: Duration::from_secs(timeout_secs),
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
        })
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_max_pool_size(mut self, max: u32) -> Self {
        self.max_pool_size = max;
        self
    }

    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.server_selection_timeout = duration;
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_config(mut self, config: MongoConfig) -> Self {
        self.max_pool_size = config.max_pool_size;
        self.server_selection_timeout = config.server_selection_timeout;
        self.app_name = config.app_name;
        self
    }

    pub async fn build(self) -> Result<MongoContext> {
        MongoContext::restore(self).await
    }
}
