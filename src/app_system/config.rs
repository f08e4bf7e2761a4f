use thiserror::Error;
use crate::domain::{OperatorId, Roster};

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ACTOR_BUFFER: usize = 32;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid operator id in {var}: {value:?}")]
    InvalidOperatorId { var: &'static str, value: String },
}

/// Process configuration.
///
/// # Environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ADMIN_IDS | (empty) | comma-separated admin operator ids |
/// | CASHIER_IDS | (empty) | comma-separated cashier operator ids |
/// | LOG_LEVEL | info | log filter when RUST_LOG is unset |
/// | ACTOR_BUFFER | 32 | mailbox size of each actor |
/// | CONSOLE_OPERATOR_ID | first admin, else first cashier | who the console acts as |
///
/// A `.env` file in the working directory is loaded first, if present.
#[derive(Debug, Clone)]
pub struct Config {
    pub admin_ids: Vec<OperatorId>,
    pub cashier_ids: Vec<OperatorId>,
    pub log_level: String,
    pub actor_buffer: usize,
    console_operator: Option<OperatorId>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key -> value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let ids = |var: &'static str| parse_ids(var, lookup(var).as_deref().unwrap_or(""));
        Ok(Self {
            admin_ids: ids("ADMIN_IDS")?,
            cashier_ids: ids("CASHIER_IDS")?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.into()),
            actor_buffer: lookup("ACTOR_BUFFER")
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(DEFAULT_ACTOR_BUFFER),
            console_operator: lookup("CONSOLE_OPERATOR_ID").and_then(|v| v.trim().parse().ok()),
        })
    }

    pub fn roster(&self) -> Roster {
        Roster::new(self.admin_ids.iter().copied(), self.cashier_ids.iter().copied())
    }

    pub fn console_operator(&self) -> Option<OperatorId> {
        self.console_operator
            .or_else(|| self.admin_ids.first().copied())
            .or_else(|| self.cashier_ids.first().copied())
    }
}

fn parse_ids(var: &'static str, raw: &str) -> Result<Vec<OperatorId>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry.parse().map_err(|_| ConfigError::InvalidOperatorId {
                var,
                value: entry.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert!(config.roster().is_empty());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.actor_buffer, 32);
        assert_eq!(config.console_operator(), None);
    }

    #[test]
    fn test_operator_lists() {
        let config = config(&[
            ("ADMIN_IDS", "100, 200"),
            ("CASHIER_IDS", "300,,200"),
            ("ACTOR_BUFFER", "0"),
        ])
        .unwrap();
        let roster = config.roster();
        assert_eq!(roster.role_of(200), Some(Role::Admin));
        assert_eq!(roster.role_of(300), Some(Role::Cashier));
        assert_eq!(config.actor_buffer, 32);
        assert_eq!(config.console_operator(), Some(100));
    }

    #[test]
    fn test_bad_operator_id_is_an_error() {
        assert_eq!(
            config(&[("CASHIER_IDS", "12,abc")]).unwrap_err(),
            ConfigError::InvalidOperatorId { var: "CASHIER_IDS", value: "abc".into() }
        );
    }
}
