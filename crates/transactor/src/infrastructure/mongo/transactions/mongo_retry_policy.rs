// crates/transactor/src/infrastructure/mongo/transactions/mongo_retry_policy.rs

use std::time::Duration;

use tokio::time::Instant;

use crate::errors::TxError;

/// Ce que le transactor fait d'une erreur pendant une tentative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RetryDecision {
    /// Nouvelle tentative complète : nouveau handle, unit of work rejoué.
    RetryUnit,
    /// Seul le commit est renvoyé, sur le même handle.
    RetryCommit,
    /// La transaction a déjà été finalisée par le unit of work.
    Done,
    Fail,
}

/// Labels et codes d'une erreur, lus une seule fois.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MongoErrorClass {
    pub transient: bool,
    pub unknown_commit_result: bool,
    pub max_time_expired: bool,
    pub closed: bool,
}

impl MongoErrorClass {
    pub fn of(err: &TxError) -> Self {
        Self {
            transient: err.is_transient_transaction_error(),
            unknown_commit_result: err.is_unknown_commit_result(),
            max_time_expired: err.is_max_time_expired(),
            closed: err.is_tx_closed(),
        }
    }
}

/// Fenêtre de rejeu, ouverte au démarrage de la première tentative.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryBudget {
    started: Instant,
    timeout: Duration,
}

impl RetryBudget {
    pub fn start(timeout: Duration) -> Self {
        Self {
            started: Instant::now(),
            timeout,
        }
    }

    pub fn is_open(&self) -> bool {
        self.started.elapsed() < self.timeout
    }
}

/// Erreur du unit of work. `None` : erreur métier sans erreur backend.
pub(crate) fn after_unit_error(class: Option<MongoErrorClass>, budget_open: bool) -> RetryDecision {
    match class {
        Some(class) if class.transient && budget_open => RetryDecision::RetryUnit,
        _ => RetryDecision::Fail,
    }
}

pub(crate) fn after_commit_error(class: MongoErrorClass, budget_open: bool) -> RetryDecision {
    if class.closed {
        return RetryDecision::Done;
    }
    if !budget_open {
        return RetryDecision::Fail;
    }
    if class.unknown_commit_result && !class.max_time_expired {
        return RetryDecision::RetryCommit;
    }
    if class.transient {
        return RetryDecision::RetryUnit;
    }
    RetryDecision::Fail
}
