mod get_account_response;
mod get_account_use_case;
mod get_account_use_case_test;

pub use get_account_response::GetAccountResponse;
pub use get_account_use_case::GetAccountUseCase;
