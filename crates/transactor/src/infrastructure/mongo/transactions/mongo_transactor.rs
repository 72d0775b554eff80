// crates/transactor/src/infrastructure/mongo/transactions/mongo_transactor.rs

use std::panic::{AssertUnwindSafe, resume_unwind};
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use mongodb::Client;
use mongodb::options::TransactionOptions;

use crate::domain::context::Context;
use crate::domain::transaction::{
    Backend, Transaction, Transactor, TransactorWithOptions, TxFuture, UnitOfWork,
    UnitOfWorkError, inject, join_existing,
};
use crate::errors::Result;
use crate::infrastructure::mongo::transactions::mongo_retry_policy::{
    MongoErrorClass, RetryBudget, RetryDecision, after_commit_error, after_unit_error,
};
use crate::infrastructure::mongo::transactions::{MongoSession, MongoTransaction};

/// Durée maximale pendant laquelle une transaction est rejouée (valeur du driver).
pub const DEFAULT_RETRY_TIMEOUT: Duration = Duration::from_secs(120);

/// Transactor MongoDB.
///
/// Suit l'algorithme "convenient transaction" du driver : le unit of work est
/// rejoué sur `TransientTransactionError`, le commit seul est rejoué sur
/// `UnknownTransactionCommitResult`, le tout borné par `retry_timeout`.
/// Les erreurs d'abort sont ignorées et la session est toujours terminée.
#[derive(Clone)]
pub struct MongoTransactor {
    client: Client,
    retry_timeout: Duration,
}

impl MongoTransactor {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            retry_timeout: DEFAULT_RETRY_TIMEOUT,
        }
    }

    pub fn with_retry_timeout(mut self, retry_timeout: Duration) -> Self {
        self.retry_timeout = retry_timeout;
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    async fn start_session(&self, ctx: &Context) -> Result<Arc<MongoSession>> {
        let session = ctx.run(self.client.start_session()).await??;
        Ok(Arc::new(MongoSession::new(session)))
    }

    fn run<'a, E: UnitOfWorkError>(
        &'a self,
        ctx: Context,
        mut unit_of_work: UnitOfWork<'a, E>,
        options: TransactionOptions,
    ) -> TxFuture<'a, (), E> {
        Box::pin(async move {
            if join_existing(&ctx, Backend::Mongo)?.is_some() {
                return unit_of_work(ctx).await;
            }

            let session = self.start_session(&ctx).await?;
            let budget = RetryBudget::start(self.retry_timeout);
            let mut attempt = 0u32;

            let result = 'attempt: loop {
                attempt += 1;
                let started = MongoTransaction::start(&ctx, session.clone(), options.clone()).await;
                let tx = match started {
                    Ok(tx) => Arc::new(tx),
                    Err(err) => break Err(E::from(err)),
                };
                tracing::debug!(transaction_id = %tx.id(), attempt, "Mongo transaction begun");

                let outcome = AssertUnwindSafe(unit_of_work(inject(&ctx, tx.clone())))
                    .catch_unwind()
                    .await;

                let unit_result = match outcome {
                    Ok(unit_result) => unit_result,
                    Err(panic) => {
                        tx.abort_quietly(&ctx).await;
                        tx.close().await;
                        session.end().await;
                        resume_unwind(panic);
                    }
                };

                if let Err(err) = unit_result {
                    tx.abort_quietly(&ctx).await;
                    tx.close().await;
                    let class = err.tx_error().map(MongoErrorClass::of);
                    match after_unit_error(class, budget.is_open()) {
                        RetryDecision::RetryUnit => {
                            tracing::warn!(
                                attempt,
                                "🔁 Transient transaction error, retrying the unit of work"
                            );
                            continue 'attempt;
                        }
                        _ => break Err(err),
                    }
                }

                loop {
                    let err = match tx.commit(&ctx).await {
                        Ok(()) => {
                            tracing::debug!(
                                transaction_id = %tx.id(),
                                "Mongo transaction committed"
                            );
                            tx.close().await;
                            break 'attempt Ok(());
                        }
                        Err(err) => err,
                    };

                    match after_commit_error(MongoErrorClass::of(&err), budget.is_open()) {
                        RetryDecision::RetryCommit => {
                            tracing::warn!(
                                transaction_id = %tx.id(),
                                "🔁 Unknown commit result, retrying commit: {}",
                                err
                            );
                        }
                        RetryDecision::RetryUnit => {
                            tx.close().await;
                            tracing::warn!(
                                attempt,
                                "🔁 Transient commit error, retrying the unit of work: {}",
                                err
                            );
                            continue 'attempt;
                        }
                        RetryDecision::Done => {
                            tx.close().await;
                            break 'attempt Ok(());
                        }
                        RetryDecision::Fail => {
                            tx.close().await;
                            break 'attempt Err(E::from(err));
                        }
                    }
                }
            };

            session.end().await;
            result
        })
    }
}

impl<E: UnitOfWorkError> Transactor<E> for MongoTransactor {
    fn run_in_transaction<'a>(
        &'a self,
        ctx: Context,
        unit_of_work: UnitOfWork<'a, E>,
    ) -> TxFuture<'a, (), E> {
        self.run(ctx, unit_of_work, TransactionOptions::default())
    }
}

impl<E: UnitOfWorkError> TransactorWithOptions<E> for MongoTransactor {
    type Options = TransactionOptions;

    fn run_in_transaction_with_options<'a>(
        &'a self,
        ctx: Context,
        unit_of_work: UnitOfWork<'a, E>,
        options: TransactionOptions,
    ) -> TxFuture<'a, (), E> {
        self.run(ctx, unit_of_work, options)
    }
}
