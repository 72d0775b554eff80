// crates/transactor/src/domain/transaction/mod.rs

mod runner_resolver;
mod transaction;
mod transaction_store;
mod transactor;

pub use runner_resolver::RunnerResolver;
pub use transaction::{Backend, StateCell, Transaction, TransactionHandle, TransactionState};
pub use transaction_store::{extract, inject};
pub use transactor::{
    Transactor, TransactorExt, TransactorWithOptions, TransactorWithOptionsExt, TxFuture,
    UnitOfWork, UnitOfWorkError,
};
pub(crate) use transactor::{join_existing, run_and_finalize};

#[cfg(any(test, feature = "test-utils"))]
mod transaction_stub;
#[cfg(any(test, feature = "test-utils"))]
mod transactor_stub;

#[cfg(any(test, feature = "test-utils"))]
pub use transaction_stub::{StubEvent, StubTransaction};
#[cfg(any(test, feature = "test-utils"))]
pub use transactor_stub::{StubOptions, StubRunner, StubStore, StubTransactor};
