// crates/transactor/src/infrastructure/mongo/transactions/mongo_session.rs

use mongodb::ClientSession;
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};

use crate::domain::context::Context;
use crate::errors::{Result, TxError};

/// Session du driver partagée par toutes les tentatives d'une même transaction.
pub struct MongoSession {
    inner: Mutex<Option<ClientSession>>,
}

impl MongoSession {
    pub(crate) fn new(session: ClientSession) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }

    pub async fn lock(&self, ctx: &Context) -> Result<MappedMutexGuard<'_, ClientSession>> {
        let guard = ctx.run(self.inner.lock()).await?;
        MutexGuard::try_map(guard, Option::as_mut).map_err(|_| TxError::TxClosed)
    }

    /// Termine la session. Le drop du `ClientSession` la rend au pool du driver.
    pub(crate) async fn end(&self) {
        drop(self.inner.lock().await.take());
    }
}
