// crates/transactor/src/infrastructure/postgres/transactions/postgres_transaction.rs

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgConnection, Postgres, Transaction as PostgresTx};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::context::Context;
use crate::domain::transaction::{
    Backend, StateCell, Transaction, TransactionHandle, TransactionState,
};
use crate::errors::{Result, TxError};

/// Transaction sqlx partagée par toutes les dérivations du contexte.
///
/// `None` une fois commit, rollback ou release effectués.
pub struct PostgresTransaction {
    id: Uuid,
    state: StateCell,
    inner: Mutex<Option<PostgresTx<'static, Postgres>>>,
}

impl PostgresTransaction {
    pub fn new(tx: PostgresTx<'static, Postgres>) -> Self {
        Self {
            id: Uuid::now_v7(),
            state: StateCell::new(),
            inner: Mutex::new(Some(tx)),
        }
    }

    /// Connexion de la transaction, verrouillée le temps d'une opération.
    pub async fn connection(&self, ctx: &Context) -> Result<MappedMutexGuard<'_, PgConnection>> {
        if self.state.get() != TransactionState::Begun {
            return Err(TxError::TxClosed);
        }
        let guard = ctx.run(self.inner.lock()).await?;
        MutexGuard::try_map(guard, |inner| inner.as_deref_mut()).map_err(|_| TxError::TxClosed)
    }

    async fn take(&self) -> Option<PostgresTx<'static, Postgres>> {
        self.inner.lock().await.take()
    }
}

#[async_trait]
impl Transaction for PostgresTransaction {
    fn id(&self) -> Uuid {
        self.id
    }

    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    fn state(&self) -> TransactionState {
        self.state.get()
    }

    async fn commit(&self, ctx: &Context) -> Result<()> {
        if !self.state.transition(TransactionState::Begun, TransactionState::Committing) {
            return Err(TxError::TxClosed);
        }
        let tx = self.take().await;
        let Some(tx) = tx else {
            self.state.close();
            return Err(TxError::TxClosed);
        };
        let outcome = ctx.run(tx.commit()).await;
        self.state.close();
        outcome??;
        Ok(())
    }

    async fn rollback(&self, ctx: &Context) -> Result<()> {
        if !self.state.transition(TransactionState::Begun, TransactionState::RollingBack) {
            return Err(TxError::TxClosed);
        }
        let tx = self.take().await;
        let Some(tx) = tx else {
            self.state.close();
            return Err(TxError::TxClosed);
        };
        let outcome = ctx.run(tx.rollback()).await;
        self.state.close();
        outcome??;
        Ok(())
    }

    async fn close(&self) {
        // sqlx programme un ROLLBACK au drop d'une transaction encore ouverte
        drop(self.take().await);
        self.state.close();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Downcast du handle opaque vers la transaction Postgres.
pub trait PostgresTransactionExt {
    fn as_postgres(&self) -> Option<Arc<PostgresTransaction>>;
}

impl PostgresTransactionExt for TransactionHandle {
    fn as_postgres(&self) -> Option<Arc<PostgresTransaction>> {
        if self.backend() != Backend::Postgres {
            return None;
        }
        self.clone().into_any().downcast::<PostgresTransaction>().ok()
    }
}
