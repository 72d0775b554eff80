// backend/services/ledger-demo/src/main.rs

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use ledger::application::get_account::GetAccountUseCase;
use ledger::application::open_account::{OpenAccountCommand, OpenAccountUseCase};
use ledger::application::transfer_funds::{TransferFundsCommand, TransferFundsUseCase};
use ledger::infrastructure::postgres::repositories::{
    PostgresAccountRepository, PostgresTransferRepository,
};
use ledger::infrastructure::postgres::utils::run_ledger_postgres_migrations;
use tracing_subscriber::EnvFilter;
use transactor::domain::context::Context;
use transactor::infrastructure::postgres::PostgresContextBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 1. Configuration (DATABASE_URL & co)
    let postgres = PostgresContextBuilder::new()
        .context("invalid Postgres configuration")?
        .build()
        .await
        .context("Postgres unreachable")?;
    run_ledger_postgres_migrations(&postgres.pool()).await?;

    // 2. Contexte racine : Ctrl-C annule tout ce qui est en vol, 30 s au maximum
    let (ctx, token) = Context::background().with_timeout(Duration::from_secs(30));
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("🛑 Ctrl-C received, cancelling");
            token.cancel();
        }
    });

    // 3. Câblage
    let accounts = Arc::new(PostgresAccountRepository::new(postgres.runner_resolver()));
    let transfers = Arc::new(PostgresTransferRepository::new(postgres.runner_resolver()));
    let open = OpenAccountUseCase::new(accounts.clone());
    let transfer = TransferFundsUseCase::new(
        accounts.clone(),
        transfers.clone(),
        Arc::new(postgres.transactor()),
    );
    let get = GetAccountUseCase::new(accounts, transfers);

    // 4. Scénario
    let alice = open
        .execute(&ctx, OpenAccountCommand { owner: "alice".into(), initial_deposit: 10_000 })
        .await?;
    let bob = open
        .execute(&ctx, OpenAccountCommand { owner: "bob".into(), initial_deposit: 0 })
        .await?;

    transfer
        .execute(&ctx, TransferFundsCommand { from: *alice.id(), to: *bob.id(), amount: 2_500 })
        .await?;

    if let Err(err) = transfer
        .execute(&ctx, TransferFundsCommand { from: *bob.id(), to: *alice.id(), amount: 1_000_000 })
        .await
    {
        tracing::info!("Refused as expected: {}", err);
    }

    for id in [alice.id(), bob.id()] {
        let statement = get.execute(&ctx, id).await?;
        tracing::info!(
            owner = %statement.account.owner(),
            balance = statement.account.balance(),
            transfers = statement.transfers.len(),
            "📒 Statement"
        );
    }

    Ok(())
}
