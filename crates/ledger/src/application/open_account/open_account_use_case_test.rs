#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use transactor::domain::context::Context;

    use crate::application::open_account::{OpenAccountCommand, OpenAccountUseCase};
    use crate::domain::repositories::AccountRepositoryStub;
    use crate::errors::LedgerError;

    fn setup() -> (OpenAccountUseCase, Arc<AccountRepositoryStub>) {
        let account_repo = Arc::new(AccountRepositoryStub::new());
        (OpenAccountUseCase::new(account_repo.clone()), account_repo)
    }

    #[tokio::test]
    async fn test_open_account_with_deposit() {
        let (use_case, account_repo) = setup();

        let account = use_case
            .execute(&Context::background(), OpenAccountCommand {
                owner: "Ada".to_string(),
                initial_deposit: 1_000,
            })
            .await
            .unwrap();

        assert_eq!(account.balance(), 1_000);
        assert_eq!(account_repo.balance_of(account.id()), Some(1_000));
        // Hors transaction : aucun handle dans le contexte
        assert_eq!(*account_repo.writes.lock().unwrap(), vec![false]);
    }

    #[tokio::test]
    async fn test_open_empty_account() {
        let (use_case, _) = setup();

        let account = use_case
            .execute(&Context::background(), OpenAccountCommand {
                owner: "Grace".to_string(),
                initial_deposit: 0,
            })
            .await
            .unwrap();

        assert_eq!(account.balance(), 0);
    }

    #[tokio::test]
    async fn test_negative_deposit_is_rejected_before_any_write() {
        let (use_case, account_repo) = setup();

        let result = use_case
            .execute(&Context::background(), OpenAccountCommand {
                owner: "Ada".to_string(),
                initial_deposit: -1,
            })
            .await;

        assert!(matches!(result, Err(LedgerError::Validation { field: "amount", .. })));
        assert!(account_repo.writes.lock().unwrap().is_empty());
    }
}
