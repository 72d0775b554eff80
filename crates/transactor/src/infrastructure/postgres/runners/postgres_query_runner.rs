// crates/transactor/src/infrastructure/postgres/runners/postgres_query_runner.rs

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use sqlx::postgres::{PgArguments, PgPoolCopyExt, PgQueryResult, PgRow};
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::{FromRow, PgConnection, PgPool, Postgres};

use crate::domain::context::Context;
use crate::domain::transaction::Transaction;
use crate::errors::Result;
use crate::infrastructure::postgres::runners::PostgresBatch;
use crate::infrastructure::postgres::runners::postgres_copy::{
    copy_statement, encode_text_rows, feed,
};
use crate::infrastructure::postgres::transactions::PostgresTransaction;

/// Surface de requêtes commune au pool et à la transaction en cours.
///
/// Le code métier ne voit que ce type : il ne sait pas s'il tourne dans une
/// transaction. Chaque appel passe par `Context::run`, l'annulation du
/// contexte abandonne donc l'opération.
#[derive(Clone)]
pub enum PostgresQueryRunner {
    Pool(PgPool),
    Transaction(Arc<PostgresTransaction>),
}

impl PostgresQueryRunner {
    pub fn is_transactional(&self) -> bool {
        matches!(self, Self::Transaction(_))
    }

    pub fn transaction(&self) -> Option<&Arc<PostgresTransaction>> {
        match self {
            Self::Transaction(tx) => Some(tx),
            Self::Pool(_) => None,
        }
    }

    pub async fn execute<'q>(
        &self,
        ctx: &Context,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Result<PgQueryResult> {
        let result = match self {
            Self::Pool(pool) => ctx.run(query.execute(pool)).await?,
            Self::Transaction(tx) => {
                let mut conn = tx.connection(ctx).await?;
                ctx.run(query.execute(&mut *conn)).await?
            }
        };
        Ok(result?)
    }

    pub async fn fetch_all<'q, O>(
        &self,
        ctx: &Context,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> Result<Vec<O>>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        let rows = match self {
            Self::Pool(pool) => ctx.run(query.fetch_all(pool)).await?,
            Self::Transaction(tx) => {
                let mut conn = tx.connection(ctx).await?;
                ctx.run(query.fetch_all(&mut *conn)).await?
            }
        };
        Ok(rows?)
    }

    /// Exactement une ligne, sinon `sqlx::Error::RowNotFound`.
    pub async fn fetch_one<'q, O>(
        &self,
        ctx: &Context,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> Result<O>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        let row = match self {
            Self::Pool(pool) => ctx.run(query.fetch_one(pool)).await?,
            Self::Transaction(tx) => {
                let mut conn = tx.connection(ctx).await?;
                ctx.run(query.fetch_one(&mut *conn)).await?
            }
        };
        Ok(row?)
    }

    pub async fn fetch_optional<'q, O>(
        &self,
        ctx: &Context,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> Result<Option<O>>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        let row = match self {
            Self::Pool(pool) => ctx.run(query.fetch_optional(pool)).await?,
            Self::Transaction(tx) => {
                let mut conn = tx.connection(ctx).await?;
                ctx.run(query.fetch_optional(&mut *conn)).await?
            }
        };
        Ok(row?)
    }

    pub async fn fetch_scalar<'q, O>(
        &self,
        ctx: &Context,
        query: QueryScalar<'q, Postgres, O, PgArguments>,
    ) -> Result<O>
    where
        O: Send + Unpin,
        (O,): Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        let value = match self {
            Self::Pool(pool) => ctx.run(query.fetch_one(pool)).await?,
            Self::Transaction(tx) => {
                let mut conn = tx.connection(ctx).await?;
                ctx.run(query.fetch_one(&mut *conn)).await?
            }
        };
        Ok(value?)
    }

    /// Exécute les requêtes du lot dans l'ordre et s'arrête à la première erreur.
    ///
    /// Hors transaction, le lot tourne dans sa propre transaction : il est
    /// appliqué entièrement ou pas du tout.
    pub async fn send_batch<'q>(
        &self,
        ctx: &Context,
        batch: PostgresBatch<'q>,
    ) -> Result<Vec<PgQueryResult>> {
        match self {
            Self::Pool(pool) => {
                let mut tx = ctx.run(pool.begin()).await??;
                let results = run_batch(ctx, &mut *tx, batch).await?;
                ctx.run(tx.commit()).await??;
                Ok(results)
            }
            Self::Transaction(tx) => {
                let mut conn = tx.connection(ctx).await?;
                run_batch(ctx, &mut *conn, batch).await
            }
        }
    }

    /// Import en masse via `COPY ... FROM STDIN`. Retourne le nombre de lignes copiées.
    pub async fn copy_from<I, R, S>(
        &self,
        ctx: &Context,
        table: &[&str],
        columns: &[&str],
        rows: I,
    ) -> Result<u64>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let statement = copy_statement(table, columns);
        let (data, encoded) = encode_text_rows(rows);
        tracing::debug!(rows = encoded, "{}", statement);
        self.copy_in_raw(ctx, &statement, &data).await
    }

    /// `statement` doit être un `COPY ... FROM STDIN` ; `data` est envoyé tel quel.
    pub async fn copy_in_raw(&self, ctx: &Context, statement: &str, data: &[u8]) -> Result<u64> {
        match self {
            Self::Pool(pool) => {
                let copy = ctx.run(pool.copy_in_raw(statement)).await??;
                feed(ctx, copy, data).await
            }
            Self::Transaction(tx) => {
                let mut conn = tx.connection(ctx).await?;
                let copy = ctx.run(conn.copy_in_raw(statement)).await??;
                feed(ctx, copy, data).await
            }
        }
    }

    /// Accès direct à la connexion pour ce que la surface ne couvre pas.
    pub async fn with_connection<T, F>(&self, ctx: &Context, f: F) -> Result<T>
    where
        F: for<'c> FnOnce(
                &'c mut PgConnection,
            ) -> Pin<Box<dyn Future<Output = Result<T>> + Send + 'c>>
            + Send,
        T: Send,
    {
        match self {
            Self::Pool(pool) => {
                let mut conn = ctx.run(pool.acquire()).await??;
                ctx.run(f(&mut *conn)).await?
            }
            Self::Transaction(tx) => {
                let mut conn = tx.connection(ctx).await?;
                ctx.run(f(&mut *conn)).await?
            }
        }
    }

    /// Identifiant de la transaction en cours, pour les logs.
    pub fn transaction_id(&self) -> Option<uuid::Uuid> {
        self.transaction().map(|tx| tx.id())
    }
}

async fn run_batch(
    ctx: &Context,
    conn: &mut PgConnection,
    batch: PostgresBatch<'_>,
) -> Result<Vec<PgQueryResult>> {
    let mut results = Vec::with_capacity(batch.len());
    for query in batch.queries {
        results.push(ctx.run(query.execute(&mut *conn)).await??);
    }
    Ok(results)
}
