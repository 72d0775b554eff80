// crates/ledger/src/infrastructure/postgres/repositories/postgres_account_repository.rs

use async_trait::async_trait;
use transactor::domain::context::Context;
use transactor::domain::transaction::RunnerResolver;
use transactor::infrastructure::postgres::PostgresRunnerResolver;

use crate::domain::entities::Account;
use crate::domain::repositories::AccountRepository;
use crate::domain::value_objects::AccountId;
use crate::errors::{LedgerError, Result};
use crate::infrastructure::postgres::mappers::PostgresErrorExt;
use crate::infrastructure::postgres::rows::PostgresAccountRow;

const SELECT_ACCOUNT: &str = "SELECT id, owner, balance FROM ledger_accounts WHERE id = $1";
const SELECT_ACCOUNT_FOR_UPDATE: &str =
    "SELECT id, owner, balance FROM ledger_accounts WHERE id = $1 FOR UPDATE";

pub struct PostgresAccountRepository {
    resolver: PostgresRunnerResolver,
}

impl PostgresAccountRepository {
    pub fn new(resolver: PostgresRunnerResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, ctx: &Context, account: &Account) -> Result<()> {
        let row = PostgresAccountRow::from(account);
        self.resolver
            .runner(ctx)
            .execute(
                ctx,
                sqlx::query("INSERT INTO ledger_accounts (id, owner, balance) VALUES ($1, $2, $3)")
                    .bind(row.id)
                    .bind(row.owner)
                    .bind(row.balance),
            )
            .await
            .map_unique_violation("Account", "id", account.id())?;
        Ok(())
    }

    async fn find_by_id(&self, ctx: &Context, id: &AccountId) -> Result<Option<Account>> {
        let runner = self.resolver.runner(ctx);
        // Le verrou n'a de sens que dans une transaction
        let sql = if runner.is_transactional() {
            SELECT_ACCOUNT_FOR_UPDATE
        } else {
            SELECT_ACCOUNT
        };

        let row = runner
            .fetch_optional(ctx, sqlx::query_as::<_, PostgresAccountRow>(sql).bind(id.as_uuid()))
            .await?;
        Ok(row.map(Account::from))
    }

    async fn save_balance(&self, ctx: &Context, account: &Account) -> Result<()> {
        let result = self
            .resolver
            .runner(ctx)
            .execute(
                ctx,
                sqlx::query(
                    "UPDATE ledger_accounts SET balance = $2, updated_at = NOW() WHERE id = $1",
                )
                .bind(account.id().as_uuid())
                .bind(account.balance()),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::NotFound {
                entity: "Account",
                id: account.id().to_string(),
            });
        }
        Ok(())
    }
}
