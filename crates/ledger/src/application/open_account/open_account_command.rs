// crates/ledger/src/application/open_account/open_account_command.rs

#[derive(Debug, Clone)]
pub struct OpenAccountCommand {
    pub owner: String,
    /// En centimes, 0 pour un compte vide
    pub initial_deposit: i64,
}
