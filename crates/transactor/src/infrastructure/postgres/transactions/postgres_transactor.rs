// crates/transactor/src/infrastructure/postgres/transactions/postgres_transactor.rs

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::context::Context;
use crate::domain::transaction::{
    Backend, Transaction, Transactor, TransactorWithOptions, TxFuture, UnitOfWork,
    UnitOfWorkError, join_existing, run_and_finalize,
};
use crate::errors::Result;
use crate::infrastructure::postgres::transactions::{PostgresTransaction, PostgresTxOptions};

#[derive(Clone)]
pub struct PostgresTransactor {
    pool: PgPool,
}

impl PostgresTransactor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ouvre une transaction et applique les options. Un échec du
    /// `SET TRANSACTION` est un échec d'ouverture : la transaction sqlx
    /// est abandonnée (rollback au drop).
    pub async fn begin(
        &self,
        ctx: &Context,
        options: &PostgresTxOptions,
    ) -> Result<Arc<PostgresTransaction>> {
        let mut tx = ctx.run(self.pool.begin()).await??;

        if let Some(statement) = options.set_transaction_statement() {
            ctx.run(sqlx::query(&statement).execute(&mut *tx)).await??;
        }

        let tx = Arc::new(PostgresTransaction::new(tx));
        tracing::debug!(transaction_id = %tx.id(), ?options, "Postgres transaction begun");
        Ok(tx)
    }

    fn run<'a, E: UnitOfWorkError>(
        &'a self,
        ctx: Context,
        mut unit_of_work: UnitOfWork<'a, E>,
        options: PostgresTxOptions,
    ) -> TxFuture<'a, (), E> {
        Box::pin(async move {
            if join_existing(&ctx, Backend::Postgres)?.is_some() {
                return unit_of_work(ctx).await;
            }

            let tx = self.begin(&ctx, &options).await.inspect_err(|err| {
                tracing::error!("❌ Failed to begin Postgres transaction: {}", err);
            })?;
            run_and_finalize(&ctx, tx, unit_of_work).await
        })
    }
}

impl<E: UnitOfWorkError> Transactor<E> for PostgresTransactor {
    fn run_in_transaction<'a>(
        &'a self,
        ctx: Context,
        unit_of_work: UnitOfWork<'a, E>,
    ) -> TxFuture<'a, (), E> {
        self.run(ctx, unit_of_work, PostgresTxOptions::default())
    }
}

impl<E: UnitOfWorkError> TransactorWithOptions<E> for PostgresTransactor {
    type Options = PostgresTxOptions;

    fn run_in_transaction_with_options<'a>(
        &'a self,
        ctx: Context,
        unit_of_work: UnitOfWork<'a, E>,
        options: PostgresTxOptions,
    ) -> TxFuture<'a, (), E> {
        self.run(ctx, unit_of_work, options)
    }
}
