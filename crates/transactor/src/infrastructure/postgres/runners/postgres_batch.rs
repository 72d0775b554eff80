// crates/transactor/src/infrastructure/postgres/runners/postgres_batch.rs

use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;

/// Requêtes exécutées dans l'ordre sur une même connexion par `send_batch`.
#[derive(Default)]
pub struct PostgresBatch<'q> {
    pub(crate) queries: Vec<Query<'q, Postgres, PgArguments>>,
}

impl<'q> PostgresBatch<'q> {
    pub fn new() -> Self {
        Self { queries: Vec::new() }
    }

    pub fn queue(mut self, query: Query<'q, Postgres, PgArguments>) -> Self {
        self.queries.push(query);
        self
    }

    pub fn push(&mut self, query: Query<'q, Postgres, PgArguments>) {
        self.queries.push(query);
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
