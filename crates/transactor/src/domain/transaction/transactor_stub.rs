// crates/transactor/src/domain/transaction/transactor_stub.rs

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::domain::context::Context;
use crate::domain::transaction::{
    Backend, RunnerResolver, StubEvent, StubTransaction, Transaction, TransactionHandle,
    Transactor, TransactorWithOptions, TxFuture, UnitOfWork, UnitOfWorkError, extract,
    join_existing, run_and_finalize,
};
use crate::errors::{Result, TxError};

/// Table clé/valeur en mémoire avec contrainte d'unicité sur la clé.
#[derive(Clone, Default)]
pub struct StubStore {
    rows: Arc<Mutex<BTreeMap<String, String>>>,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, key: &str, value: &str) {
        self.rows.lock().unwrap().insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.rows.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn apply(&self, staged: Vec<(String, String)>) {
        self.rows.lock().unwrap().extend(staged);
    }

    pub(crate) fn duplicate_key(key: &str) -> TxError {
        TxError::other(format!(
            "duplicate key value violates unique constraint \"{key}\""
        ))
    }
}

impl RunnerResolver for StubStore {
    type Runner = StubRunner;

    fn runner(&self, ctx: &Context) -> StubRunner {
        let tx = extract(ctx)
            .filter(|handle| handle.backend() == Backend::Stub)
            .and_then(|handle| handle.into_any().downcast::<StubTransaction>().ok());

        match tx {
            Some(tx) => StubRunner::Transaction(tx),
            None => StubRunner::Store(self.clone()),
        }
    }
}

pub enum StubRunner {
    Store(StubStore),
    Transaction(Arc<StubTransaction>),
}

impl StubRunner {
    pub fn is_transactional(&self) -> bool {
        matches!(self, Self::Transaction(_))
    }

    pub fn transaction_id(&self) -> Option<Uuid> {
        match self {
            Self::Transaction(tx) => Some(tx.id()),
            Self::Store(_) => None,
        }
    }

    pub async fn insert(&self, ctx: &Context, key: &str, value: &str) -> Result<()> {
        if let Some(err) = ctx.err() {
            return Err(err.into());
        }
        match self {
            Self::Transaction(tx) => tx.stage(key, value),
            Self::Store(store) => {
                let mut rows = store.rows.lock().unwrap();
                if rows.contains_key(key) {
                    return Err(StubStore::duplicate_key(key));
                }
                rows.insert(key.to_string(), value.to_string());
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StubOptions {
    pub label: Option<String>,
}

#[derive(Default)]
struct StubFailures {
    begin: Option<String>,
    commit: Option<String>,
    rollback: Option<String>,
}

/// Transactor en mémoire : même protocole de finalize que les vrais backends,
/// avec injection de pannes et journal des événements.
pub struct StubTransactor {
    store: StubStore,
    events: Arc<Mutex<Vec<StubEvent>>>,
    failures: Mutex<StubFailures>,
    handles: Mutex<Vec<Uuid>>,
    options: Mutex<Vec<StubOptions>>,
}

impl StubTransactor {
    pub fn new(store: StubStore) -> Self {
        Self {
            store,
            events: Arc::new(Mutex::new(Vec::new())),
            failures: Mutex::new(StubFailures::default()),
            handles: Mutex::new(Vec::new()),
            options: Mutex::new(Vec::new()),
        }
    }

    pub fn store(&self) -> &StubStore {
        &self.store
    }

    pub fn fail_begin(&self, message: &str) {
        self.failures.lock().unwrap().begin = Some(message.to_string());
    }

    pub fn fail_commit(&self, message: &str) {
        self.failures.lock().unwrap().commit = Some(message.to_string());
    }

    pub fn fail_rollback(&self, message: &str) {
        self.failures.lock().unwrap().rollback = Some(message.to_string());
    }

    pub fn events(&self) -> Vec<StubEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn handle_ids(&self) -> Vec<Uuid> {
        self.handles.lock().unwrap().clone()
    }

    pub fn begin_options(&self) -> Vec<StubOptions> {
        self.options.lock().unwrap().clone()
    }

    fn begin(&self, options: StubOptions) -> Result<TransactionHandle> {
        self.options.lock().unwrap().push(options);
        let failures = self.failures.lock().unwrap();
        if let Some(message) = &failures.begin {
            return Err(TxError::other(message.clone()));
        }

        let tx = StubTransaction::recording(
            self.store.clone(),
            self.events.clone(),
            failures.commit.clone(),
            failures.rollback.clone(),
        );
        self.events.lock().unwrap().push(StubEvent::Begin);
        self.handles.lock().unwrap().push(tx.id());
        Ok(Arc::new(tx))
    }

    fn run<'a, E: UnitOfWorkError>(
        &'a self,
        ctx: Context,
        mut unit_of_work: UnitOfWork<'a, E>,
        options: StubOptions,
    ) -> TxFuture<'a, (), E> {
        Box::pin(async move {
            if join_existing(&ctx, Backend::Stub)?.is_some() {
                return unit_of_work(ctx).await;
            }
            let handle = self.begin(options)?;
            run_and_finalize(&ctx, handle, unit_of_work).await
        })
    }
}

impl<E: UnitOfWorkError> Transactor<E> for StubTransactor {
    fn run_in_transaction<'a>(
        &'a self,
        ctx: Context,
        unit_of_work: UnitOfWork<'a, E>,
    ) -> TxFuture<'a, (), E> {
        self.run(ctx, unit_of_work, StubOptions::default())
    }
}

impl<E: UnitOfWorkError> TransactorWithOptions<E> for StubTransactor {
    type Options = StubOptions;

    fn run_in_transaction_with_options<'a>(
        &'a self,
        ctx: Context,
        unit_of_work: UnitOfWork<'a, E>,
        options: StubOptions,
    ) -> TxFuture<'a, (), E> {
        self.run(ctx, unit_of_work, options)
    }
}
