// crates/transactor/src/domain/transaction/transactor.rs

use std::future::Future;
use std::panic::{AssertUnwindSafe, resume_unwind};
use std::pin::Pin;

use futures::FutureExt;

use crate::domain::context::Context;
use crate::domain::transaction::{Backend, TransactionHandle, extract, inject};
use crate::errors::{Result, TxError};

pub type TxFuture<'a, T, E = TxError> =
    Pin<Box<dyn Future<Output = std::result::Result<T, E>> + Send + 'a>>;

/// Logique métier exécutée dans une transaction.
///
/// `FnMut` et non `FnOnce` : le runner MongoDB peut la rejouer de façon
/// transparente (erreur transitoire). Elle doit donc rester ré-exécutable :
/// pas d'effet de bord non idempotent en dehors de la ressource transactionnelle.
pub type UnitOfWork<'a, E = TxError> =
    Box<dyn FnMut(Context) -> TxFuture<'a, (), E> + Send + 'a>;

/// Type d'erreur d'un unit of work.
///
/// L'appelant garde son propre type d'erreur (remonté tel quel) ; le transactor
/// doit seulement pouvoir y convertir ses erreurs et relire une éventuelle
/// erreur backend pour la classifier.
pub trait UnitOfWorkError: From<TxError> + Send + 'static {
    fn tx_error(&self) -> Option<&TxError>;
}

impl UnitOfWorkError for TxError {
    fn tx_error(&self) -> Option<&TxError> {
        Some(self)
    }
}

pub trait Transactor<E: UnitOfWorkError = TxError>: Send + Sync {
    /// Équivalent à `run_in_transaction_with_options` avec les options par défaut du backend.
    fn run_in_transaction<'a>(
        &'a self,
        ctx: Context,
        unit_of_work: UnitOfWork<'a, E>,
    ) -> TxFuture<'a, (), E>;
}

pub trait TransactorWithOptions<E: UnitOfWorkError = TxError>: Transactor<E> {
    type Options: Default + Send + 'static;

    /// Les options sont transmises telles quelles à l'ouverture de la transaction.
    fn run_in_transaction_with_options<'a>(
        &'a self,
        ctx: Context,
        unit_of_work: UnitOfWork<'a, E>,
        options: Self::Options,
    ) -> TxFuture<'a, (), E>;
}

pub trait TransactorExt<E: UnitOfWorkError>: Transactor<E> {
    fn within_transaction<'a, F, Fut>(&'a self, ctx: Context, mut f: F) -> TxFuture<'a, (), E>
    where
        F: FnMut(Context) -> Fut + Send + 'a,
        Fut: Future<Output = std::result::Result<(), E>> + Send + 'a,
    {
        self.run_in_transaction(
            ctx,
            Box::new(move |ctx| -> TxFuture<'a, (), E> { Box::pin(f(ctx)) }),
        )
    }
}

impl<E: UnitOfWorkError, T: Transactor<E> + ?Sized> TransactorExt<E> for T {}

pub trait TransactorWithOptionsExt<E: UnitOfWorkError>: TransactorWithOptions<E> {
    fn within_transaction_with_options<'a, F, Fut>(
        &'a self,
        ctx: Context,
        options: Self::Options,
        mut f: F,
    ) -> TxFuture<'a, (), E>
    where
        F: FnMut(Context) -> Fut + Send + 'a,
        Fut: Future<Output = std::result::Result<(), E>> + Send + 'a,
    {
        self.run_in_transaction_with_options(
            ctx,
            Box::new(move |ctx| -> TxFuture<'a, (), E> { Box::pin(f(ctx)) }),
            options,
        )
    }
}

impl<E: UnitOfWorkError, T: TransactorWithOptions<E> + ?Sized> TransactorWithOptionsExt<E> for T {}

/// Transaction déjà ouverte sur ce contexte, à réutiliser par un appel imbriqué.
///
/// Les appels imbriqués sont aplatis dans la transaction externe : pas de
/// savepoint, pas de second handle sur la même chaîne de contextes.
pub(crate) fn join_existing(ctx: &Context, backend: Backend) -> Result<Option<TransactionHandle>> {
    let Some(handle) = extract(ctx) else {
        return Ok(None);
    };
    if handle.backend() != backend {
        return Err(TxError::BackendMismatch {
            expected: backend,
            found: handle.backend(),
        });
    }
    if handle.is_closed() {
        return Err(TxError::TxClosed);
    }
    tracing::debug!(
        transaction_id = %handle.id(),
        "Nested transaction joins the outer one"
    );
    Ok(Some(handle))
}

/// Exécute le unit of work sur `handle` puis finalise exactement une fois.
///
/// - succès : commit, l'échec du commit devient l'erreur finale ;
/// - erreur : rollback, l'échec du rollback remplace l'erreur du unit of work
///   sauf s'il signale une transaction déjà fermée ;
/// - panic : rollback, release, puis la panic reprend son cours.
///
/// Le handle est libéré dans tous les cas.
pub(crate) async fn run_and_finalize<'a, E: UnitOfWorkError>(
    ctx: &Context,
    handle: TransactionHandle,
    mut unit_of_work: UnitOfWork<'a, E>,
) -> std::result::Result<(), E> {
    let tx_ctx = inject(ctx, handle.clone());
    let outcome = AssertUnwindSafe(unit_of_work(tx_ctx)).catch_unwind().await;

    let result = match outcome {
        Ok(Ok(())) => match handle.commit(ctx).await {
            Ok(()) => {
                tracing::debug!(transaction_id = %handle.id(), "Transaction committed");
                Ok(())
            }
            Err(err) if err.is_tx_closed() => {
                tracing::debug!(
                    transaction_id = %handle.id(),
                    "Transaction already closed by the unit of work, commit skipped"
                );
                Ok(())
            }
            Err(err) => Err(E::from(err)),
        },
        Ok(Err(err)) => match handle.rollback(ctx).await {
            Ok(()) => {
                tracing::debug!(transaction_id = %handle.id(), "Transaction rolled back");
                Err(err)
            }
            Err(rollback_err) if rollback_err.is_tx_closed() => {
                tracing::debug!(
                    transaction_id = %handle.id(),
                    "Transaction already closed by the unit of work, rollback skipped"
                );
                Err(err)
            }
            Err(rollback_err) => {
                tracing::warn!(
                    transaction_id = %handle.id(),
                    "Rollback failed, reporting it instead of the unit of work error: {}",
                    rollback_err
                );
                Err(E::from(rollback_err))
            }
        },
        Err(panic) => {
            if let Err(rollback_err) = handle.rollback(ctx).await {
                tracing::error!(
                    transaction_id = %handle.id(),
                    "Rollback after panic failed: {}",
                    rollback_err
                );
            }
            handle.close().await;
            resume_unwind(panic);
        }
    };

    handle.close().await;
    result
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::transaction::{
        RunnerResolver, StubEvent, StubOptions, StubStore, StubTransaction, StubTransactor,
        Transaction, TransactionState,
    };
    use crate::errors::ContextError;

    fn setup() -> (StubTransactor, StubStore) {
        let store = StubStore::new();
        (StubTransactor::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_commit_on_success() {
        let (transactor, store) = setup();

        let result = transactor
            .within_transaction(Context::background(), |ctx| {
                let store = store.clone();
                async move {
                    let runner = store.runner(&ctx);
                    runner.insert(&ctx, "a", "1").await?;
                    runner.insert(&ctx, "b", "2").await?;
                    Ok::<(), TxError>(())
                }
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(store.get("a").as_deref(), Some("1"));
        assert_eq!(store.get("b").as_deref(), Some("2"));
        assert_eq!(
            transactor.events(),
            vec![StubEvent::Begin, StubEvent::Commit, StubEvent::Close]
        );
    }

    #[tokio::test]
    async fn test_rollback_on_failure_returns_unit_error() {
        let (transactor, store) = setup();

        let result = transactor
            .within_transaction(Context::background(), |ctx| {
                let store = store.clone();
                async move {
                    store.runner(&ctx).insert(&ctx, "a", "1").await?;
                    Err::<(), TxError>(TxError::other("business rule violated"))
                }
            })
            .await;

        let err = result.expect_err("unit of work error must surface");
        assert_eq!(err.to_string(), "business rule violated");
        assert!(store.get("a").is_none());
        assert_eq!(
            transactor.events(),
            vec![StubEvent::Begin, StubEvent::Rollback, StubEvent::Close]
        );
    }

    #[tokio::test]
    async fn test_duplicate_key_rolls_back_every_write() {
        let (transactor, store) = setup();
        store.seed("b", "existing");

        let result = transactor
            .within_transaction(Context::background(), |ctx| {
                let store = store.clone();
                async move {
                    let runner = store.runner(&ctx);
                    runner.insert(&ctx, "a", "row A").await?;
                    runner.insert(&ctx, "b", "row B").await?;
                    Ok::<(), TxError>(())
                }
            })
            .await;

        let err = result.expect_err("duplicate key must fail");
        assert!(err.to_string().contains("duplicate key"));
        assert!(store.get("a").is_none());
        assert_eq!(store.get("b").as_deref(), Some("existing"));
    }

    #[tokio::test]
    async fn test_begin_failure_skips_finalize() {
        let (transactor, _store) = setup();
        transactor.fail_begin("too many connections");
        let calls = Arc::new(AtomicUsize::new(0));

        let result = transactor
            .within_transaction(Context::background(), |_ctx| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), TxError>(())
                }
            })
            .await;

        assert_eq!(result.unwrap_err().to_string(), "too many connections");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(transactor.events().is_empty());
    }

    #[tokio::test]
    async fn test_commit_failure_is_the_final_error() {
        let (transactor, store) = setup();
        transactor.fail_commit("serialization failure");

        let result = transactor
            .within_transaction(Context::background(), |ctx| {
                let store = store.clone();
                async move { store.runner(&ctx).insert(&ctx, "a", "1").await }
            })
            .await;

        assert_eq!(result.unwrap_err().to_string(), "serialization failure");
        assert!(store.get("a").is_none());
        assert_eq!(
            transactor.events(),
            vec![StubEvent::Begin, StubEvent::Commit, StubEvent::Close]
        );
    }

    #[tokio::test]
    async fn test_rollback_failure_replaces_unit_error() {
        let (transactor, _store) = setup();
        transactor.fail_rollback("connection reset");

        let result = transactor
            .within_transaction(Context::background(), |_ctx| async move {
                Err::<(), TxError>(TxError::other("original"))
            })
            .await;

        assert_eq!(result.unwrap_err().to_string(), "connection reset");
    }

    #[tokio::test]
    async fn test_already_closed_keeps_unit_error() {
        let (transactor, _store) = setup();

        let result = transactor
            .within_transaction(Context::background(), |ctx| async move {
                let handle = extract(&ctx).expect("handle must be injected");
                handle.rollback(&ctx).await?;
                Err::<(), TxError>(TxError::other("failed after closing"))
            })
            .await;

        assert_eq!(result.unwrap_err().to_string(), "failed after closing");
    }

    #[tokio::test]
    async fn test_unit_closing_then_succeeding_is_ok() {
        let (transactor, store) = setup();

        let result = transactor
            .within_transaction(Context::background(), |ctx| {
                let store = store.clone();
                async move {
                    store.runner(&ctx).insert(&ctx, "a", "1").await?;
                    extract(&ctx).expect("handle").commit(&ctx).await
                }
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(store.get("a").as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_panic_rolls_back_then_propagates() {
        let (transactor, store) = setup();

        let outcome = AssertUnwindSafe(transactor.within_transaction(
            Context::background(),
            |ctx| {
                let store = store.clone();
                async move {
                    store.runner(&ctx).insert(&ctx, "a", "1").await?;
                    if ctx.deadline().is_none() {
                        panic!("unexpected fault");
                    }
                    Ok::<(), TxError>(())
                }
            },
        ))
        .catch_unwind()
        .await;

        assert!(outcome.is_err(), "panic must be propagated");
        assert!(store.get("a").is_none());
        assert_eq!(
            transactor.events(),
            vec![StubEvent::Begin, StubEvent::Rollback, StubEvent::Close]
        );
    }

    #[tokio::test]
    async fn test_runner_resolution_fidelity() {
        let (transactor, store) = setup();
        assert!(!store.runner(&Context::background()).is_transactional());

        let seen = Arc::new(std::sync::Mutex::new(None));
        transactor
            .within_transaction(Context::background(), |ctx| {
                let store = store.clone();
                let seen = seen.clone();
                async move {
                    let runner = store.runner(&ctx);
                    *seen.lock().unwrap() = runner.transaction_id();
                    Ok::<(), TxError>(())
                }
            })
            .await
            .unwrap();

        let handle_id = transactor.handle_ids()[0];
        assert_eq!(*seen.lock().unwrap(), Some(handle_id));
    }

    #[tokio::test]
    async fn test_sequential_calls_use_distinct_handles() {
        let (transactor, store) = setup();

        for key in ["first", "second"] {
            transactor
                .within_transaction(Context::background(), |ctx| {
                    let store = store.clone();
                    async move { store.runner(&ctx).insert(&ctx, key, "row").await }
                })
                .await
                .unwrap();
        }

        let ids = transactor.handle_ids();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert!(store.get("first").is_some());
        assert!(store.get("second").is_some());
    }

    #[tokio::test]
    async fn test_options_pass_through() {
        let (transactor, _store) = setup();
        let options = StubOptions {
            label: Some("read-only".into()),
        };

        transactor
            .within_transaction_with_options(Context::background(), options.clone(), |_ctx| async {
                Ok::<(), TxError>(())
            })
            .await
            .unwrap();
        transactor
            .within_transaction(Context::background(), |_ctx| async { Ok::<(), TxError>(()) })
            .await
            .unwrap();

        assert_eq!(
            transactor.begin_options(),
            vec![options, StubOptions::default()]
        );
    }

    #[tokio::test]
    async fn test_nested_call_is_flattened() {
        let (transactor, store) = setup();
        let transactor = Arc::new(transactor);

        let result = transactor
            .within_transaction(Context::background(), |ctx| {
                let store = store.clone();
                let inner = transactor.clone();
                async move {
                    store.runner(&ctx).insert(&ctx, "outer", "1").await?;
                    inner
                        .within_transaction(ctx.clone(), |ctx| {
                            let store = store.clone();
                            async move { store.runner(&ctx).insert(&ctx, "inner", "2").await }
                        })
                        .await?;
                    Err::<(), TxError>(TxError::other("outer fails"))
                }
            })
            .await;

        assert!(result.is_err());
        assert!(store.get("outer").is_none());
        assert!(store.get("inner").is_none(), "inner writes belong to the outer transaction");
        assert_eq!(transactor.handle_ids().len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_context_surfaces_failure() {
        let (transactor, store) = setup();
        let (ctx, token) = Context::background().with_cancel();

        let result = transactor
            .within_transaction(ctx, |ctx| {
                let store = store.clone();
                let token = token.clone();
                async move {
                    store.runner(&ctx).insert(&ctx, "a", "1").await?;
                    token.cancel();
                    store.runner(&ctx).insert(&ctx, "b", "2").await
                }
            })
            .await;

        assert!(matches!(
            result,
            Err(TxError::Context(ContextError::Canceled))
        ));
        assert!(store.get("a").is_none());
    }

    #[tokio::test]
    async fn test_closed_handle_rejects_further_operations() {
        let handle = StubTransaction::new();
        let ctx = Context::background();

        handle.commit(&ctx).await.unwrap();

        assert_eq!(handle.state(), TransactionState::Closed);
        assert!(handle.commit(&ctx).await.unwrap_err().is_tx_closed());
        assert!(handle.rollback(&ctx).await.unwrap_err().is_tx_closed());
    }

    #[tokio::test]
    async fn test_foreign_backend_handle_is_rejected() {
        let (transactor, _store) = setup();
        let foreign: TransactionHandle = Arc::new(StubTransaction::with_backend(Backend::Mongo));
        let ctx = inject(&Context::background(), foreign);

        let result = transactor
            .within_transaction(ctx, |_ctx| async { Ok::<(), TxError>(()) })
            .await;

        assert!(matches!(
            result,
            Err(TxError::BackendMismatch { expected: Backend::Stub, found: Backend::Mongo })
        ));
    }
}
