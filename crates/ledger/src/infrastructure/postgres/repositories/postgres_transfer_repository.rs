// crates/ledger/src/infrastructure/postgres/repositories/postgres_transfer_repository.rs

use async_trait::async_trait;
use transactor::domain::context::Context;
use transactor::domain::transaction::RunnerResolver;
use transactor::infrastructure::postgres::PostgresRunnerResolver;

use crate::domain::entities::Transfer;
use crate::domain::repositories::TransferRepository;
use crate::domain::value_objects::AccountId;
use crate::errors::Result;
use crate::infrastructure::postgres::mappers::PostgresErrorExt;
use crate::infrastructure::postgres::rows::PostgresTransferRow;

pub struct PostgresTransferRepository {
    resolver: PostgresRunnerResolver,
}

impl PostgresTransferRepository {
    pub fn new(resolver: PostgresRunnerResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl TransferRepository for PostgresTransferRepository {
    async fn record(&self, ctx: &Context, transfer: &Transfer) -> Result<()> {
        self.resolver
            .runner(ctx)
            .execute(
                ctx,
                sqlx::query(
                    r#"
                    INSERT INTO ledger_transfers (id, from_account_id, to_account_id, amount)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(transfer.id().as_uuid())
                .bind(transfer.from_account().as_uuid())
                .bind(transfer.to_account().as_uuid())
                .bind(transfer.amount().cents()),
            )
            .await
            .map_unique_violation("Transfer", "id", transfer.id())?;
        Ok(())
    }

    async fn list_for_account(
        &self,
        ctx: &Context,
        account_id: &AccountId,
    ) -> Result<Vec<Transfer>> {
        let rows = self
            .resolver
            .runner(ctx)
            .fetch_all(
                ctx,
                sqlx::query_as::<_, PostgresTransferRow>(
                    r#"
                    SELECT id, from_account_id, to_account_id, amount
                    FROM ledger_transfers
                    WHERE from_account_id = $1 OR to_account_id = $1
                    ORDER BY id
                    "#,
                )
                .bind(account_id.as_uuid()),
            )
            .await?;
        Ok(rows.into_iter().map(Transfer::from).collect())
    }
}
