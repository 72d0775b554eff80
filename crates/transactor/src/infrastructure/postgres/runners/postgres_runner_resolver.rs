// crates/transactor/src/infrastructure/postgres/runners/postgres_runner_resolver.rs

use sqlx::PgPool;

use crate::domain::context::Context;
use crate::domain::transaction::{RunnerResolver, extract};
use crate::infrastructure::postgres::runners::PostgresQueryRunner;
use crate::infrastructure::postgres::transactions::PostgresTransactionExt;

/// Donne la transaction du contexte si elle existe, le pool sinon.
///
/// Un handle déjà fermé est tout de même retourné : les opérations échouent
/// alors avec `TxError::TxClosed`, jamais de bascule silencieuse sur le pool.
#[derive(Clone)]
pub struct PostgresRunnerResolver {
    pool: PgPool,
}

impl PostgresRunnerResolver {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RunnerResolver for PostgresRunnerResolver {
    type Runner = PostgresQueryRunner;

    fn runner(&self, ctx: &Context) -> PostgresQueryRunner {
        match extract(ctx).and_then(|handle| handle.as_postgres()) {
            Some(tx) => PostgresQueryRunner::Transaction(tx),
            None => PostgresQueryRunner::Pool(self.pool.clone()),
        }
    }
}
