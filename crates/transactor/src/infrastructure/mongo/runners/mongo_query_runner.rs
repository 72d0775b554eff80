// crates/transactor/src/infrastructure/mongo/runners/mongo_query_runner.rs

use std::borrow::Borrow;
use std::sync::Arc;

use futures::TryStreamExt;
use mongodb::bson::Document;
use mongodb::options::UpdateModifications;
use mongodb::results::{DeleteResult, InsertManyResult, InsertOneResult, UpdateResult};
use mongodb::{Client, Collection};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::context::Context;
use crate::domain::transaction::Transaction;
use crate::errors::Result;
use crate::infrastructure::mongo::transactions::MongoTransaction;

/// Opérations de collection, sur la session de la transaction en cours ou
/// directement sur le client.
#[derive(Clone)]
pub enum MongoQueryRunner {
    Client(Client),
    Session {
        client: Client,
        transaction: Arc<MongoTransaction>,
    },
}

impl MongoQueryRunner {
    pub fn is_transactional(&self) -> bool {
        matches!(self, Self::Session { .. })
    }

    pub fn client(&self) -> &Client {
        match self {
            Self::Client(client) => client,
            Self::Session { client, .. } => client,
        }
    }

    pub fn transaction_id(&self) -> Option<uuid::Uuid> {
        match self {
            Self::Session { transaction, .. } => Some(transaction.id()),
            Self::Client(_) => None,
        }
    }

    pub async fn insert_one<T>(
        &self,
        ctx: &Context,
        collection: &Collection<T>,
        document: impl Borrow<T> + Send + Sync,
    ) -> Result<InsertOneResult>
    where
        T: Serialize + Send + Sync,
    {
        let result = match self {
            Self::Client(_) => ctx.run(collection.insert_one(document)).await?,
            Self::Session { transaction, .. } => {
                let mut session = transaction.session(ctx).await?;
                ctx.run(collection.insert_one(document).session(&mut *session)).await?
            }
        };
        Ok(result?)
    }

    pub async fn insert_many<T, D>(
        &self,
        ctx: &Context,
        collection: &Collection<T>,
        documents: impl IntoIterator<Item = D> + Send,
    ) -> Result<InsertManyResult>
    where
        T: Serialize + Send + Sync,
        D: Borrow<T> + Send + Sync,
    {
        let result = match self {
            Self::Client(_) => ctx.run(collection.insert_many(documents)).await?,
            Self::Session { transaction, .. } => {
                let mut session = transaction.session(ctx).await?;
                ctx.run(collection.insert_many(documents).session(&mut *session)).await?
            }
        };
        Ok(result?)
    }

    pub async fn find_one<T>(
        &self,
        ctx: &Context,
        collection: &Collection<T>,
        filter: Document,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let result = match self {
            Self::Client(_) => ctx.run(collection.find_one(filter)).await?,
            Self::Session { transaction, .. } => {
                let mut session = transaction.session(ctx).await?;
                ctx.run(collection.find_one(filter).session(&mut *session)).await?
            }
        };
        Ok(result?)
    }

    /// Curseur entièrement lu en mémoire.
    pub async fn find<T>(
        &self,
        ctx: &Context,
        collection: &Collection<T>,
        filter: Document,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        match self {
            Self::Client(_) => {
                let cursor = ctx.run(collection.find(filter)).await??;
                Ok(ctx.run(cursor.try_collect::<Vec<T>>()).await??)
            }
            Self::Session { transaction, .. } => {
                let mut session = transaction.session(ctx).await?;
                let mut cursor = ctx.run(collection.find(filter).session(&mut *session).into_future()).await??;
                let mut documents = Vec::new();
                while let Some(document) = ctx.run(cursor.next(&mut *session)).await? {
                    documents.push(document?);
                }
                Ok(documents)
            }
        }
    }

    pub async fn update_one<T>(
        &self,
        ctx: &Context,
        collection: &Collection<T>,
        filter: Document,
        update: impl Into<UpdateModifications> + Send,
    ) -> Result<UpdateResult>
    where
        T: Send + Sync,
    {
        let result = match self {
            Self::Client(_) => ctx.run(collection.update_one(filter, update)).await?,
            Self::Session { transaction, .. } => {
                let mut session = transaction.session(ctx).await?;
                ctx.run(collection.update_one(filter, update).session(&mut *session)).await?
            }
        };
        Ok(result?)
    }

    pub async fn update_many<T>(
        &self,
        ctx: &Context,
        collection: &Collection<T>,
        filter: Document,
        update: impl Into<UpdateModifications> + Send,
    ) -> Result<UpdateResult>
    where
        T: Send + Sync,
    {
        let result = match self {
            Self::Client(_) => ctx.run(collection.update_many(filter, update)).await?,
            Self::Session { transaction, .. } => {
                let mut session = transaction.session(ctx).await?;
                ctx.run(collection.update_many(filter, update).session(&mut *session)).await?
            }
        };
        Ok(result?)
    }

    pub async fn delete_one<T>(
        &self,
        ctx: &Context,
        collection: &Collection<T>,
        filter: Document,
    ) -> Result<DeleteResult>
    where
        T: Send + Sync,
    {
        let result = match self {
            Self::Client(_) => ctx.run(collection.delete_one(filter)).await?,
            Self::Session { transaction, .. } => {
                let mut session = transaction.session(ctx).await?;
                ctx.run(collection.delete_one(filter).session(&mut *session)).await?
            }
        };
        Ok(result?)
    }

    pub async fn delete_many<T>(
        &self,
        ctx: &Context,
        collection: &Collection<T>,
        filter: Document,
    ) -> Result<DeleteResult>
    where
        T: Send + Sync,
    {
        let result = match self {
            Self::Client(_) => ctx.run(collection.delete_many(filter)).await?,
            Self::Session { transaction, .. } => {
                let mut session = transaction.session(ctx).await?;
                ctx.run(collection.delete_many(filter).session(&mut *session)).await?
            }
        };
        Ok(result?)
    }

    pub async fn count_documents<T>(
        &self,
        ctx: &Context,
        collection: &Collection<T>,
        filter: Document,
    ) -> Result<u64>
    where
        T: Send + Sync,
    {
        let count = match self {
            Self::Client(_) => ctx.run(collection.count_documents(filter)).await?,
            Self::Session { transaction, .. } => {
                let mut session = transaction.session(ctx).await?;
                ctx.run(collection.count_documents(filter).session(&mut *session)).await?
            }
        };
        Ok(count?)
    }
}
