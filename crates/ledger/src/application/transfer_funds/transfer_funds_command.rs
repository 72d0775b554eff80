// crates/ledger/src/application/transfer_funds/transfer_funds_command.rs

use crate::domain::value_objects::AccountId;

#[derive(Debug, Clone)]
pub struct TransferFundsCommand {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: i64,
}
