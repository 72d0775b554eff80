// crates/transactor/src/infrastructure/mongo/runners/mongo_runner_resolver.rs

use mongodb::Client;

use crate::domain::context::Context;
use crate::domain::transaction::{RunnerResolver, extract};
use crate::infrastructure::mongo::runners::MongoQueryRunner;
use crate::infrastructure::mongo::transactions::MongoTransactionExt;

#[derive(Clone)]
pub struct MongoRunnerResolver {
    client: Client,
}

impl MongoRunnerResolver {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl RunnerResolver for MongoRunnerResolver {
    type Runner = MongoQueryRunner;

    fn runner(&self, ctx: &Context) -> MongoQueryRunner {
        match extract(ctx).and_then(|handle| handle.as_mongo()) {
            Some(tx) => MongoQueryRunner::Session {
                client: self.client.clone(),
                transaction: tx,
            },
            None => MongoQueryRunner::Client(self.client.clone()),
        }
    }
}
