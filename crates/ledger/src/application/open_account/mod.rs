mod open_account_command;
mod open_account_use_case;
mod open_account_use_case_test;

pub use open_account_command::OpenAccountCommand;
pub use open_account_use_case::OpenAccountUseCase;
