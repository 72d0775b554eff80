// crates/ledger/src/application/get_account/get_account_response.rs

use crate::domain::entities::{Account, Transfer};

#[derive(Debug, Clone)]
pub struct GetAccountResponse {
    pub account: Account,
    pub transfers: Vec<Transfer>,
}
