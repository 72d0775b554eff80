// crates/transactor/src/infrastructure/utils/env.rs

use std::str::FromStr;

use crate::errors::{Result, TxError};

pub(crate) fn required(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| TxError::Configuration(format!("{name} must be set")))
}

// Une variable absente prend la valeur par défaut, une variable illisible est une erreur.
pub(crate) fn env_or<T: FromStr>(name: &str, default: T) -> Result<T> {
    parse_or(name, std::env::var(name).ok(), default)
}

fn parse_or<T: FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        Some(raw) => raw
            .parse()
            .map_err(|_| TxError::Configuration(format!("{name} is not a valid value: {raw}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_when_unset() {
        let value: u32 = env_or("TRANSACTOR_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_unparseable_value_is_a_configuration_error() {
        let err = parse_or::<u32>("MONGODB_MAX_POOL_SIZE", Some("ten".to_string()), 10)
            .unwrap_err();

        assert!(matches!(err, TxError::Configuration(_)));
        assert_eq!(
            err.to_string(),
            "invalid configuration: MONGODB_MAX_POOL_SIZE is not a valid value: ten"
        );
    }

    #[test]
    fn test_parseable_value_wins_over_default() {
        let value = parse_or::<u64>("MONGODB_SERVER_SELECTION_TIMEOUT", Some("12".into()), 5);
        assert_eq!(value.unwrap(), 12);
    }

    #[test]
    fn test_required_reports_the_missing_variable() {
        let err = required("TRANSACTOR_TEST_UNSET_VARIABLE").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: TRANSACTOR_TEST_UNSET_VARIABLE must be set"
        );
    }
}
