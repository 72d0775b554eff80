// crates/transactor/src/domain/transaction/transaction_store.rs

use crate::domain::context::{Context, ContextKey};
use crate::domain::transaction::TransactionHandle;

// Type privé : inaccessible hors de ce module, donc aucune collision possible.
struct TransactionKey;

impl ContextKey for TransactionKey {
    type Value = TransactionHandle;
}

/// Retourne un contexte dérivé qui porte `handle`. `ctx` n'est pas modifié.
pub fn inject(ctx: &Context, handle: TransactionHandle) -> Context {
    ctx.with_value::<TransactionKey>(handle)
}

/// Handle le plus proche dans la chaîne de `ctx`, ou `None`.
pub fn extract(ctx: &Context) -> Option<TransactionHandle> {
    ctx.value::<TransactionKey>().cloned()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::transaction::StubTransaction;

    #[test]
    fn test_extract_on_plain_context_is_absent() {
        assert!(extract(&Context::background()).is_none());
    }

    #[test]
    fn test_inject_is_isolated_from_parent() {
        let ctx = Context::background();
        let handle: TransactionHandle = Arc::new(StubTransaction::new());

        let tx_ctx = inject(&ctx, handle.clone());

        let found = extract(&tx_ctx).expect("handle should be present");
        assert!(Arc::ptr_eq(&found, &handle));
        assert!(extract(&ctx).is_none());
    }

    #[test]
    fn test_handle_survives_further_derivation() {
        let handle: TransactionHandle = Arc::new(StubTransaction::new());
        let tx_ctx = inject(&Context::background(), handle.clone());
        let (derived, _token) = tx_ctx.with_cancel();

        let found = extract(&derived).expect("handle should be inherited");
        assert_eq!(found.id(), handle.id());
    }
}
