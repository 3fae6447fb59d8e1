use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{defaults, envconfig::EnvConfig, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub lists: ListsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }
}

impl EnvConfig for AppConfig {
    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
            ansi: defaults::DEFAULT_LOG_ANSI,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_idle: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: defaults::DEFAULT_DATABASE_URL.to_string(),
            max_connections: defaults::DEFAULT_DB_MAX_CONNECTIONS,
            min_idle: defaults::DEFAULT_DB_MIN_IDLE,
        }
    }
}

/// Seed values for the list created on first run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListsConfig {
    pub default_name: String,
    pub default_description: Option<String>,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            default_name: defaults::DEFAULT_LIST_NAME.to_string(),
            default_description: Some(defaults::DEFAULT_LIST_DESCRIPTION.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::AppConfig;
    use crate::config::{EnvConfig, defaults};

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn falls_back_to_defaults_without_variables() {
        let cfg = AppConfig::from_vars(HashMap::new()).expect("defaults should load");

        assert_eq!(cfg.general.host, defaults::DEFAULT_HOST);
        assert_eq!(cfg.general.port, defaults::DEFAULT_PORT);
        assert_eq!(cfg.database.url, defaults::DEFAULT_DATABASE_URL);
        assert_eq!(cfg.lists.default_name, defaults::DEFAULT_LIST_NAME);
    }

    #[test]
    fn reads_nested_sections_from_prefixed_variables() {
        let cfg = AppConfig::from_vars(vars(&[
            ("APP_GENERAL__PORT", "8081"),
            ("APP_DATABASE__URL", "sqlite::memory:"),
            ("APP_DATABASE__MAX_CONNECTIONS", "1"),
            ("APP_DATABASE__MIN_IDLE", "1"),
            ("APP_LISTS__DEFAULT_NAME", "Inbox"),
        ]))
        .expect("config should load");

        assert_eq!(cfg.general.port, 8081);
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.database.max_connections, 1);
        assert_eq!(cfg.lists.default_name, "Inbox");
    }

    #[test]
    fn rejects_invalid_values() {
        let err = AppConfig::from_vars(vars(&[
            ("APP_DATABASE__MAX_CONNECTIONS", "1"),
            ("APP_DATABASE__MIN_IDLE", "4"),
        ]))
        .expect_err("min_idle above max_connections should fail");

        assert!(format!("{err:#}").contains("database.min_idle"));
    }
}
