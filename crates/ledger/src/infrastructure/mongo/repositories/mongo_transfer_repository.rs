// crates/ledger/src/infrastructure/mongo/repositories/mongo_transfer_repository.rs

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Collection, Database};
use transactor::domain::context::Context;
use transactor::domain::transaction::RunnerResolver;
use transactor::infrastructure::mongo::MongoRunnerResolver;

use crate::domain::entities::Transfer;
use crate::domain::repositories::TransferRepository;
use crate::domain::value_objects::AccountId;
use crate::errors::Result;
use crate::infrastructure::mongo::documents::MongoTransferDocument;
use crate::infrastructure::mongo::mappers::MongoErrorExt;

pub const TRANSFERS_COLLECTION: &str = "ledger_transfers";

pub struct MongoTransferRepository {
    resolver: MongoRunnerResolver,
    transfers: Collection<MongoTransferDocument>,
}

impl MongoTransferRepository {
    pub fn new(resolver: MongoRunnerResolver, database: &Database) -> Self {
        Self {
            resolver,
            transfers: database.collection(TRANSFERS_COLLECTION),
        }
    }
}

#[async_trait]
impl TransferRepository for MongoTransferRepository {
    async fn record(&self, ctx: &Context, transfer: &Transfer) -> Result<()> {
        self.resolver
            .runner(ctx)
            .insert_one(ctx, &self.transfers, MongoTransferDocument::from(transfer))
            .await
            .map_duplicate_key("Transfer", "id", transfer.id())?;
        Ok(())
    }

    async fn list_for_account(
        &self,
        ctx: &Context,
        account_id: &AccountId,
    ) -> Result<Vec<Transfer>> {
        let id = account_id.to_string();
        let mut documents = self
            .resolver
            .runner(ctx)
            .find(
                ctx,
                &self.transfers,
                doc! {
                    "$or": [
                        { "from_account_id": id.as_str() },
                        { "to_account_id": id.as_str() },
                    ]
                },
            )
            .await?;

        // UUID v7 en texte : l'ordre lexicographique est l'ordre chronologique
        documents.sort_by(|a, b| a.id.cmp(&b.id));
        documents.into_iter().map(Transfer::try_from).collect()
    }
}
