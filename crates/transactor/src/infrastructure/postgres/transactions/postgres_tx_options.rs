// crates/transactor/src/infrastructure/postgres/transactions/postgres_tx_options.rs

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostgresIsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl fmt::Display for PostgresIsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            Self::ReadUncommitted => "READ UNCOMMITTED",
            Self::ReadCommitted => "READ COMMITTED",
            Self::RepeatableRead => "REPEATABLE READ",
            Self::Serializable => "SERIALIZABLE",
        };
        f.write_str(level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostgresAccessMode {
    ReadWrite,
    ReadOnly,
}

impl fmt::Display for PostgresAccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadWrite => f.write_str("READ WRITE"),
            Self::ReadOnly => f.write_str("READ ONLY"),
        }
    }
}

/// Options d'ouverture d'une transaction Postgres.
///
/// Un champ à `None` garde le réglage par défaut du serveur.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostgresTxOptions {
    pub isolation_level: Option<PostgresIsolationLevel>,
    pub access_mode: Option<PostgresAccessMode>,
    pub deferrable: Option<bool>,
}

impl PostgresTxOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_isolation_level(mut self, level: PostgresIsolationLevel) -> Self {
        self.isolation_level = Some(level);
        self
    }

    pub fn with_access_mode(mut self, mode: PostgresAccessMode) -> Self {
        self.access_mode = Some(mode);
        self
    }

    pub fn read_only(self) -> Self {
        self.with_access_mode(PostgresAccessMode::ReadOnly)
    }

    pub fn with_deferrable(mut self, deferrable: bool) -> Self {
        self.deferrable = Some(deferrable);
        self
    }

    /// `SET TRANSACTION ...` à exécuter juste après le `BEGIN`, ou `None`
    /// si toutes les options sont celles du serveur.
    pub fn set_transaction_statement(&self) -> Option<String> {
        let mut modes = Vec::new();
        if let Some(level) = self.isolation_level {
            modes.push(format!("ISOLATION LEVEL {level}"));
        }
        if let Some(mode) = self.access_mode {
            modes.push(mode.to_string());
        }
        match self.deferrable {
            Some(true) => modes.push("DEFERRABLE".to_string()),
            Some(false) => modes.push("NOT DEFERRABLE".to_string()),
            None => {}
        }

        if modes.is_empty() {
            None
        } else {
            Some(format!("SET TRANSACTION {}", modes.join(", ")))
        }
    }
}
