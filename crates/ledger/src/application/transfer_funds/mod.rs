mod transfer_funds_command;
mod transfer_funds_use_case;

pub use transfer_funds_command::TransferFundsCommand;
pub use transfer_funds_use_case::TransferFundsUseCase;
