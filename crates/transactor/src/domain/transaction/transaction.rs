// crates/transactor/src/domain/transaction/transaction.rs

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::context::Context;
use crate::errors::Result;

/// Handle opaque partagé entre toutes les dérivations d'un même contexte.
pub type TransactionHandle = Arc<dyn Transaction>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Postgres,
    Mongo,
    Stub,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Postgres => "postgres",
            Self::Mongo => "mongo",
            Self::Stub => "stub",
        };
        f.write_str(name)
    }
}

/// `Begun -> (Committing | RollingBack) -> Closed`, jamais de retour vers `Begun`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TransactionState {
    Begun = 0,
    Committing = 1,
    RollingBack = 2,
    Closed = 3,
}

impl TransactionState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Begun,
            1 => Self::Committing,
            2 => Self::RollingBack,
            _ => Self::Closed,
        }
    }
}

/// État d'un handle, lisible sans prendre le verrou de la connexion.
#[derive(Debug)]
pub struct StateCell(AtomicU8);

impl StateCell {
    pub fn new() -> Self {
        Self(AtomicU8::new(TransactionState::Begun as u8))
    }

    pub fn get(&self) -> TransactionState {
        TransactionState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub fn close(&self) {
        self.0.store(TransactionState::Closed as u8, Ordering::Release);
    }

    /// Passe de `from` à `to` ; échoue si l'état courant n'est pas `from`
    /// ou si `to` est `Begun`.
    pub fn transition(&self, from: TransactionState, to: TransactionState) -> bool {
        if to == TransactionState::Begun {
            return false;
        }
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
pub trait Transaction: Send + Sync + Any {
    fn id(&self) -> Uuid;

    fn backend(&self) -> Backend;

    fn state(&self) -> TransactionState;

    fn is_closed(&self) -> bool {
        self.state() == TransactionState::Closed
    }

    /// Échoue avec `TxError::TxClosed` si le handle est déjà finalisé.
    async fn commit(&self, ctx: &Context) -> Result<()>;

    /// Échoue avec `TxError::TxClosed` si le handle est déjà finalisé.
    async fn rollback(&self, ctx: &Context) -> Result<()>;

    /// Libère la session / connexion sous-jacente. Idempotent.
    async fn close(&self);

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_cell_never_goes_back_to_begun() {
        let state = StateCell::new();
        assert_eq!(state.get(), TransactionState::Begun);

        assert!(state.transition(TransactionState::Begun, TransactionState::Committing));
        assert!(!state.transition(TransactionState::Begun, TransactionState::RollingBack));

        state.close();
        assert_eq!(state.get(), TransactionState::Closed);
        assert!(!state.transition(TransactionState::Closed, TransactionState::Begun));
        assert_eq!(state.get(), TransactionState::Closed);
    }
}
