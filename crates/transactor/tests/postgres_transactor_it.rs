// crates/transactor/tests/postgres_transactor_it.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use transactor::domain::context::Context;
use transactor::domain::transaction::{
    RunnerResolver, Transaction, TransactorExt, TransactorWithOptionsExt, extract,
};
use transactor::errors::TxError;
use transactor::infrastructure::postgres::utils::PostgresTestContext;
use transactor::infrastructure::postgres::{
    PostgresBatch, PostgresIsolationLevel, PostgresRunnerResolver, PostgresTxOptions,
};

const SCHEMA: &str = r#"
    CREATE TABLE items (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
"#;

async fn setup() -> PostgresTestContext {
    PostgresTestContext::builder()
        .with_schema(SCHEMA)
        .build()
        .await
        .expect("Postgres container")
}

async fn insert(
    resolver: &PostgresRunnerResolver,
    ctx: &Context,
    key: &str,
    value: &str,
) -> Result<(), TxError> {
    resolver
        .runner(ctx)
        .execute(
            ctx,
            sqlx::query("INSERT INTO items (key, value) VALUES ($1, $2)")
                .bind(key.to_string())
                .bind(value.to_string()),
        )
        .await?;
    Ok(())
}

async fn value_of(resolver: &PostgresRunnerResolver, key: &str) -> Option<String> {
    let ctx = Context::background();
    resolver
        .runner(&ctx)
        .fetch_optional(
            &ctx,
            sqlx::query_as::<_, (String,)>("SELECT value FROM items WHERE key = $1")
                .bind(key.to_string()),
        )
        .await
        .unwrap()
        .map(|(value,)| value)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_commit_makes_every_write_visible() {
    let db = setup().await;
    let (transactor, resolver) = (db.transactor(), db.runner_resolver());

    let result = transactor
        .within_transaction(Context::background(), |ctx| {
            let resolver = resolver.clone();
            async move {
                insert(&resolver, &ctx, "a", "1").await?;
                insert(&resolver, &ctx, "b", "2").await?;
                Ok::<(), TxError>(())
            }
        })
        .await;

    assert!(result.is_ok());
    assert_eq!(value_of(&resolver, "a").await.as_deref(), Some("1"));
    assert_eq!(value_of(&resolver, "b").await.as_deref(), Some("2"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_failure_rolls_back_and_surfaces_unit_error() {
    let db = setup().await;
    let (transactor, resolver) = (db.transactor(), db.runner_resolver());

    let result = transactor
        .within_transaction(Context::background(), |ctx| {
            let resolver = resolver.clone();
            async move {
                insert(&resolver, &ctx, "a", "1").await?;
                Err::<(), TxError>(TxError::other("insufficient funds"))
            }
        })
        .await;

    assert_eq!(result.unwrap_err().to_string(), "insufficient funds");
    assert!(value_of(&resolver, "a").await.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_key_discards_earlier_writes() {
    let db = setup().await;
    let (transactor, resolver) = (db.transactor(), db.runner_resolver());
    insert(&resolver, &Context::background(), "b", "existing").await.unwrap();

    let result = transactor
        .within_transaction(Context::background(), |ctx| {
            let resolver = resolver.clone();
            async move {
                insert(&resolver, &ctx, "a", "row A").await?;
                insert(&resolver, &ctx, "b", "row B").await?;
                Ok::<(), TxError>(())
            }
        })
        .await;

    // 1. L'erreur du driver remonte telle quelle
    match result {
        Err(TxError::Postgres(sqlx::Error::Database(db_err))) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
        }
        other => panic!("expected a unique violation, got {other:?}"),
    }

    // 2. Rien de la transaction n'est visible
    assert!(value_of(&resolver, "a").await.is_none());
    assert_eq!(value_of(&resolver, "b").await.as_deref(), Some("existing"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_runner_follows_the_context() {
    let db = setup().await;
    let (transactor, resolver) = (db.transactor(), db.runner_resolver());
    let seen = Arc::new(Mutex::new(Vec::new()));

    assert!(!resolver.runner(&Context::background()).is_transactional());

    for _ in 0..2 {
        transactor
            .within_transaction(Context::background(), |ctx| {
                let (resolver, seen) = (resolver.clone(), seen.clone());
                async move {
                    let runner = resolver.runner(&ctx);
                    assert!(runner.is_transactional());
                    let handle = extract(&ctx).expect("handle injected");
                    assert_eq!(runner.transaction_id(), Some(handle.id()));
                    seen.lock().unwrap().push(handle.id());
                    Ok::<(), TxError>(())
                }
            })
            .await
            .unwrap();
    }

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_ne!(seen[0], seen[1]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_options_reach_the_server() {
    let db = setup().await;
    let (transactor, resolver) = (db.transactor(), db.runner_resolver());
    let options = PostgresTxOptions::new()
        .with_isolation_level(PostgresIsolationLevel::Serializable)
        .read_only();

    let result = transactor
        .within_transaction_with_options(Context::background(), options, |ctx| {
            let resolver = resolver.clone();
            async move {
                let runner = resolver.runner(&ctx);
                let isolation: String = runner
                    .fetch_scalar(&ctx, sqlx::query_scalar("SHOW transaction_isolation"))
                    .await?;
                assert_eq!(isolation, "serializable");

                // Une écriture en READ ONLY est refusée par le serveur
                insert(&resolver, &ctx, "a", "1").await
            }
        })
        .await;

    assert!(matches!(result, Err(TxError::Postgres(_))));
    assert!(value_of(&resolver, "a").await.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unit_closing_its_own_transaction_is_not_an_error() {
    let db = setup().await;
    let (transactor, resolver) = (db.transactor(), db.runner_resolver());

    let result = transactor
        .within_transaction(Context::background(), |ctx| {
            let resolver = resolver.clone();
            async move {
                insert(&resolver, &ctx, "a", "1").await?;
                extract(&ctx).expect("handle injected").commit(&ctx).await?;

                // Le handle reste résolu mais toute opération échoue
                let late = insert(&resolver, &ctx, "b", "2").await;
                assert!(matches!(late, Err(TxError::TxClosed)));
                Ok::<(), TxError>(())
            }
        })
        .await;

    assert!(result.is_ok());
    assert_eq!(value_of(&resolver, "a").await.as_deref(), Some("1"));
    assert!(value_of(&resolver, "b").await.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_batch_and_copy_share_the_transaction() {
    let db = setup().await;
    let (transactor, resolver) = (db.transactor(), db.runner_resolver());

    let result = transactor
        .within_transaction(Context::background(), |ctx| {
            let resolver = resolver.clone();
            async move {
                let runner = resolver.runner(&ctx);
                let batch = PostgresBatch::new()
                    .queue(sqlx::query("INSERT INTO items (key, value) VALUES ('batch-1', 'x')"))
                    .queue(sqlx::query("INSERT INTO items (key, value) VALUES ('batch-2', 'y')"));
                let results = runner.send_batch(&ctx, batch).await?;
                assert_eq!(results.len(), 2);

                let rows = vec![
                    vec![Some("copy-1".to_string()), Some("tab\tvalue".to_string())],
                    vec![Some("copy-2".to_string()), Some("line\nbreak".to_string())],
                ];
                let copied = runner.copy_from(&ctx, &["items"], &["key", "value"], rows).await?;
                assert_eq!(copied, 2);

                Err::<(), TxError>(TxError::other("abort after bulk writes"))
            }
        })
        .await;

    assert!(result.is_err());
    assert!(value_of(&resolver, "batch-1").await.is_none());
    assert!(value_of(&resolver, "copy-1").await.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_copy_outside_transaction_escapes_values() {
    let db = setup().await;
    let resolver = db.runner_resolver();
    let ctx = Context::background();

    let rows = vec![vec![Some("k"), Some("back\\slash\ttab")]];
    let copied = resolver
        .runner(&ctx)
        .copy_from(&ctx, &["public", "items"], &["key", "value"], rows)
        .await
        .unwrap();

    assert_eq!(copied, 1);
    assert_eq!(value_of(&resolver, "k").await.as_deref(), Some("back\\slash\ttab"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_cancelled_context_aborts_the_unit() {
    let db = setup().await;
    let (transactor, resolver) = (db.transactor(), db.runner_resolver());
    let (ctx, token) = Context::background().with_cancel();
    let attempts = Arc::new(AtomicUsize::new(0));

    let result = transactor
        .within_transaction(ctx, |ctx| {
            let (resolver, token, attempts) = (resolver.clone(), token.clone(), attempts.clone());
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                insert(&resolver, &ctx, "a", "1").await?;
                token.cancel();
                insert(&resolver, &ctx, "b", "2").await
            }
        })
        .await;

    assert!(result.unwrap_err().is_canceled());
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(value_of(&resolver, "a").await.is_none());
}
