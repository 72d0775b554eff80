// crates/transactor/src/infrastructure/mongo/factories/mongo_config.rs

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub max_pool_size: u32,
    pub server_selection_timeout: Duration,
    pub app_name: Option<String>,
}

impl MongoConfig {
    pub fn new(max_pool_size: u32, server_selection_timeout: Duration) -> Self {
        Self {
            max_pool_size,
            server_selection_timeout,
            app_name: None,
        }
    }
}
