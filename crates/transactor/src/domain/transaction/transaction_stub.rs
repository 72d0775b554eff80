// crates/transactor/src/domain/transaction/transaction_stub.rs

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::context::Context;
use crate::domain::transaction::{Backend, StateCell, StubStore, Transaction, TransactionState};
use crate::errors::{Result, TxError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubEvent {
    Begin,
    Commit,
    Rollback,
    Close,
}

// --- TRANSACTION EN MÉMOIRE ---
// Les écritures sont mises de côté et appliquées au `StubStore` seulement au commit.
pub struct StubTransaction {
    id: Uuid,
    backend: Backend,
    state: StateCell,
    released: AtomicBool,
    staged: Mutex<Vec<(String, String)>>,
    store: Option<StubStore>,
    events: Arc<Mutex<Vec<StubEvent>>>,
    commit_error: Option<String>,
    rollback_error: Option<String>,
}

impl StubTransaction {
    pub fn new() -> Self {
        Self::with_backend(Backend::Stub)
    }

    pub fn with_backend(backend: Backend) -> Self {
        Self {
            id: Uuid::now_v7(),
            backend,
            state: StateCell::new(),
            released: AtomicBool::new(false),
            staged: Mutex::new(Vec::new()),
            store: None,
            events: Arc::new(Mutex::new(Vec::new())),
            commit_error: None,
            rollback_error: None,
        }
    }

    pub(crate) fn recording(
        store: StubStore,
        events: Arc<Mutex<Vec<StubEvent>>>,
        commit_error: Option<String>,
        rollback_error: Option<String>,
    ) -> Self {
        Self {
            store: Some(store),
            events,
            commit_error,
            rollback_error,
            ..Self::new()
        }
    }

    pub fn events(&self) -> Vec<StubEvent> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn stage(&self, key: &str, value: &str) -> Result<()> {
        if self.state.get() != TransactionState::Begun {
            return Err(TxError::TxClosed);
        }
        let mut staged = self.staged.lock().unwrap();
        let committed = self.store.as_ref().is_some_and(|store| store.get(key).is_some());
        if committed || staged.iter().any(|(k, _)| k == key) {
            return Err(StubStore::duplicate_key(key));
        }
        staged.push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn record(&self, event: StubEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Default for StubTransaction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transaction for StubTransaction {
    fn id(&self) -> Uuid {
        self.id
    }

    fn backend(&self) -> Backend {
        self.backend
    }

    fn state(&self) -> TransactionState {
        self.state.get()
    }

    async fn commit(&self, ctx: &Context) -> Result<()> {
        if !self.state.transition(TransactionState::Begun, TransactionState::Committing) {
            return Err(TxError::TxClosed);
        }
        self.record(StubEvent::Commit);
        let staged = std::mem::take(&mut *self.staged.lock().unwrap());
        self.state.close();

        if let Some(err) = ctx.err() {
            return Err(err.into());
        }
        if let Some(message) = &self.commit_error {
            return Err(TxError::other(message.clone()));
        }
        if let Some(store) = &self.store {
            store.apply(staged);
        }
        Ok(())
    }

    async fn rollback(&self, ctx: &Context) -> Result<()> {
        if !self.state.transition(TransactionState::Begun, TransactionState::RollingBack) {
            return Err(TxError::TxClosed);
        }
        self.record(StubEvent::Rollback);
        self.staged.lock().unwrap().clear();
        self.state.close();

        if let Some(err) = ctx.err() {
            return Err(err.into());
        }
        match &self.rollback_error {
            Some(message) => Err(TxError::other(message.clone())),
            None => Ok(()),
        }
    }

    async fn close(&self) {
        if self.released.swap(true, Ordering::AcqRel) {
            return;
        }
        self.staged.lock().unwrap().clear();
        self.state.close();
        self.record(StubEvent::Close);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
