// crates/ledger/src/infrastructure/mongo/repositories/mongo_account_repository.rs

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Collection, Database};
use transactor::domain::context::Context;
use transactor::domain::transaction::RunnerResolver;
use transactor::infrastructure::mongo::MongoRunnerResolver;

use crate::domain::entities::Account;
use crate::domain::repositories::AccountRepository;
use crate::domain::value_objects::AccountId;
use crate::errors::{LedgerError, Result};
use crate::infrastructure::mongo::documents::MongoAccountDocument;
use crate::infrastructure::mongo::mappers::MongoErrorExt;

pub const ACCOUNTS_COLLECTION: &str = "ledger_accounts";

/// Pas de verrou explicite : dans une transaction, deux écritures concurrentes
/// sur le même compte échouent en WriteConflict et le transactor rejoue.
pub struct MongoAccountRepository {
    resolver: MongoRunnerResolver,
    accounts: Collection<MongoAccountDocument>,
}

impl MongoAccountRepository {
    pub fn new(resolver: MongoRunnerResolver, database: &Database) -> Self {
        Self {
            resolver,
            accounts: database.collection(ACCOUNTS_COLLECTION),
        }
    }
}

#[async_trait]
impl AccountRepository for MongoAccountRepository {
    async fn create(&self, ctx: &Context, account: &Account) -> Result<()> {
        self.resolver
            .runner(ctx)
            .insert_one(ctx, &self.accounts, MongoAccountDocument::from(account))
            .await
            .map_duplicate_key("Account", "id", account.id())?;
        Ok(())
    }

    async fn find_by_id(&self, ctx: &Context, id: &AccountId) -> Result<Option<Account>> {
        self.resolver
            .runner(ctx)
            .find_one(ctx, &self.accounts, doc! { "_id": id.to_string() })
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn save_balance(&self, ctx: &Context, account: &Account) -> Result<()> {
        let result = self
            .resolver
            .runner(ctx)
            .update_one(
                ctx,
                &self.accounts,
                doc! { "_id": account.id().to_string() },
                doc! { "$set": { "balance": account.balance() } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(LedgerError::NotFound {
                entity: "Account",
                id: account.id().to_string(),
            });
        }
        Ok(())
    }
}
