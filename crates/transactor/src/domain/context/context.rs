// crates/transactor/src/domain/context/context.rs

use std::any::{Any, TypeId};
use std::fmt;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::errors::ContextError;

/// Clé typée d'une valeur portée par un `Context`.
///
/// La clé est le type lui-même : un type privé à un module ne peut pas être
/// nommé ailleurs, donc personne d'autre ne peut lire ou écraser sa valeur.
pub trait ContextKey: 'static {
    type Value: Any + Send + Sync;
}

struct ValueNode {
    key: TypeId,
    value: Box<dyn Any + Send + Sync>,
    parent: Option<Arc<ValueNode>>,
}

/// Contexte d'exécution immuable, dérivable et annulable.
///
/// Chaque dérivation crée un nouveau maillon qui pointe vers son parent :
/// le parent n'est jamais modifié et une recherche remonte la chaîne
/// du maillon le plus dérivé vers la racine.
#[derive(Clone)]
pub struct Context {
    values: Option<Arc<ValueNode>>,
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// Contexte racine : aucune valeur, jamais annulé, pas de deadline.
    pub fn background() -> Self {
        Self {
            values: None,
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    pub fn with_value<K: ContextKey>(&self, value: K::Value) -> Self {
        let node = ValueNode {
            key: TypeId::of::<K>(),
            value: Box::new(value),
            parent: self.values.clone(),
        };
        Self {
            values: Some(Arc::new(node)),
            token: self.token.clone(),
            deadline: self.deadline,
        }
    }

    pub fn value<K: ContextKey>(&self) -> Option<&K::Value> {
        let key = TypeId::of::<K>();
        let mut current = self.values.as_deref();
        while let Some(node) = current {
            if node.key == key {
                return node.value.downcast_ref::<K::Value>();
            }
            current = node.parent.as_deref();
        }
        None
    }

    /// Dérive un contexte annulable. Annuler le token retourné n'annule que
    /// ce contexte et ses descendants, jamais le parent.
    pub fn with_cancel(&self) -> (Self, CancellationToken) {
        let token = self.token.child_token();
        let ctx = Self {
            values: self.values.clone(),
            token: token.clone(),
            deadline: self.deadline,
        };
        (ctx, token)
    }

    /// Un enfant ne peut pas repousser la deadline de son parent.
    pub fn with_deadline(&self, deadline: Instant) -> (Self, CancellationToken) {
        let (mut ctx, token) = self.with_cancel();
        ctx.deadline = Some(match self.deadline {
            Some(parent) if parent < deadline => parent,
            _ => deadline,
        });
        (ctx, token)
    }

    pub fn with_timeout(&self, timeout: Duration) -> (Self, CancellationToken) {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn err(&self) -> Option<ContextError> {
        if self.token.is_cancelled() {
            return Some(ContextError::Canceled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// Se résout quand le contexte est annulé ou que sa deadline est passée.
    pub async fn done(&self) -> ContextError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = self.token.cancelled() => ContextError::Canceled,
                _ = tokio::time::sleep_until(deadline) => ContextError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                ContextError::Canceled
            }
        }
    }

    /// Exécute `future` tant que le contexte est vivant.
    ///
    /// Tous les appels au backend passent par ici : annuler le contexte
    /// d'origine abandonne l'opération en cours au prochain point de suspension.
    pub async fn run<F>(&self, future: F) -> Result<F::Output, ContextError>
    where
        F: IntoFuture,
    {
        if let Some(err) = self.err() {
            return Err(err);
        }
        let future = future.into_future();
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            output = future => Ok(output),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0;
        let mut current = self.values.as_deref();
        while let Some(node) = current {
            depth += 1;
            current = node.parent.as_deref();
        }
        f.debug_struct("Context")
            .field("values", &depth)
            .field("cancelled", &self.token.is_cancelled())
            .field("deadline", &self.deadline)
            .finish()
    }
}
