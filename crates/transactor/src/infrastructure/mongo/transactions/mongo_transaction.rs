// crates/transactor/src/infrastructure/mongo/transactions/mongo_transaction.rs

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::ClientSession;
use mongodb::options::TransactionOptions;
use tokio::sync::MappedMutexGuard;
use uuid::Uuid;

use crate::domain::context::Context;
use crate::domain::transaction::{
    Backend, StateCell, Transaction, TransactionHandle, TransactionState,
};
use crate::errors::{Result, TxError};
use crate::infrastructure::mongo::transactions::MongoSession;

/// Une tentative de transaction sur la session partagée.
///
/// Le transactor en crée une nouvelle à chaque rejeu : un handle déjà
/// finalisé ne redevient jamais `Begun`.
pub struct MongoTransaction {
    id: Uuid,
    state: StateCell,
    session: Arc<MongoSession>,
}

impl MongoTransaction {
    pub(crate) async fn start(
        ctx: &Context,
        session: Arc<MongoSession>,
        options: TransactionOptions,
    ) -> Result<Self> {
        {
            let mut guard = session.lock(ctx).await?;
            ctx.run(guard.start_transaction().with_options(options)).await??;
        }
        Ok(Self {
            id: Uuid::now_v7(),
            state: StateCell::new(),
            session,
        })
    }

    /// Session verrouillée le temps d'une opération, à passer aux actions du driver.
    pub async fn session(&self, ctx: &Context) -> Result<MappedMutexGuard<'_, ClientSession>> {
        if self.state.get() != TransactionState::Begun {
            return Err(TxError::TxClosed);
        }
        self.session.lock(ctx).await
    }

    /// Abort dont l'échec est seulement journalisé.
    pub(crate) async fn abort_quietly(&self, ctx: &Context) {
        if let Err(err) = self.rollback(ctx).await {
            if !err.is_tx_closed() {
                tracing::debug!(transaction_id = %self.id, "Mongo abort ignored: {}", err);
            }
        }
    }
}

#[async_trait]
impl Transaction for MongoTransaction {
    fn id(&self) -> Uuid {
        self.id
    }

    fn backend(&self) -> Backend {
        Backend::Mongo
    }

    fn state(&self) -> TransactionState {
        self.state.get()
    }

    /// Après `UnknownTransactionCommitResult` le handle reste `Committing`
    /// et le commit peut être rejoué.
    async fn commit(&self, ctx: &Context) -> Result<()> {
        let retrying = self.state.get() == TransactionState::Committing;
        if !retrying
            && !self
                .state
                .transition(TransactionState::Begun, TransactionState::Committing)
        {
            return Err(TxError::TxClosed);
        }

        let outcome = async {
            let mut guard = self.session.lock(ctx).await?;
            ctx.run(guard.commit_transaction()).await??;
            Ok::<(), TxError>(())
        }
        .await;

        match &outcome {
            Err(err) if err.is_unknown_commit_result() => {}
            _ => self.state.close(),
        }
        outcome
    }

    async fn rollback(&self, ctx: &Context) -> Result<()> {
        if !self.state.transition(TransactionState::Begun, TransactionState::RollingBack) {
            return Err(TxError::TxClosed);
        }
        let outcome = async {
            let mut guard = self.session.lock(ctx).await?;
            ctx.run(guard.abort_transaction()).await??;
            Ok::<(), TxError>(())
        }
        .await;
        self.state.close();
        outcome
    }

    /// La session appartient au transactor, qui la termine après la dernière tentative.
    async fn close(&self) {
        self.state.close();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

pub trait MongoTransactionExt {
    fn as_mongo(&self) -> Option<Arc<MongoTransaction>>;
}

impl MongoTransactionExt for TransactionHandle {
    fn as_mongo(&self) -> Option<Arc<MongoTransaction>> {
        if self.backend() != Backend::Mongo {
            return None;
        }
        self.clone().into_any().downcast::<MongoTransaction>().ok()
    }
}
