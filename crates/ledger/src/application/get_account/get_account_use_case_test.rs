#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use transactor::domain::context::Context;

    use crate::application::get_account::GetAccountUseCase;
    use crate::domain::entities::{Account, Transfer};
    use crate::domain::repositories::{AccountRepositoryStub, TransferRepositoryStub};
    use crate::domain::value_objects::{AccountId, Amount, OwnerName};

    #[tokio::test]
    async fn test_get_account_with_history() {
        let accounts = Arc::new(AccountRepositoryStub::new());
        let transfers = Arc::new(TransferRepositoryStub::new());
        let account = Account::restore(AccountId::new(), OwnerName::from_raw("ada"), 42);
        let other = AccountId::new();
        accounts.add_account(account.clone());

        let incoming = Transfer::new(other, *account.id(), Amount::try_new(42).unwrap()).unwrap();
        let unrelated =
            Transfer::new(other, AccountId::new(), Amount::try_new(1).unwrap()).unwrap();
        transfers.transfers.lock().unwrap().extend([incoming.clone(), unrelated]);

        let use_case = GetAccountUseCase::new(accounts, transfers);
        let response = use_case.execute(&Context::background(), account.id()).await.unwrap();

        assert_eq!(response.account, account);
        assert_eq!(response.transfers, vec![incoming]);
    }

    #[tokio::test]
    async fn test_get_unknown_account() {
        let use_case = GetAccountUseCase::new(
            Arc::new(AccountRepositoryStub::new()),
            Arc::new(TransferRepositoryStub::new()),
        );

        let err = use_case
            .execute(&Context::background(), &AccountId::new())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }
}
