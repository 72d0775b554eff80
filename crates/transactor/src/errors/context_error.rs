// crates/transactor/src/errors/context_error.rs

use thiserror::Error;

/// Raison pour laquelle un `Context` est terminé.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    #[error("context canceled")]
    Canceled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,
}
