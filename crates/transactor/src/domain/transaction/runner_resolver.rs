// crates/transactor/src/domain/transaction/runner_resolver.rs

use crate::domain::context::Context;

/// Donne la surface de requêtes à utiliser pour un contexte donné.
///
/// Si le contexte porte une transaction de ce backend, le runner retourné est lié
/// à cette transaction ; sinon c'est la surface partagée (pool / client).
/// N'échoue jamais : l'absence de transaction n'est pas une erreur.
pub trait RunnerResolver: Send + Sync {
    type Runner;

    fn runner(&self, ctx: &Context) -> Self::Runner;
}
