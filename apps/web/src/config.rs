//! Web server configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const DEV_JWT_SECRET: &str = "pernos-dev-secret-change-in-production";

/// Web server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// SQLite database file
    pub db_path: PathBuf,

    /// Upper bound of the connection pool
    pub db_max_connections: u32,

    /// Secret used to sign bearer tokens
    #[serde(skip_serializing)]
    pub jwt_secret: String,

    /// Bearer token lifetime in seconds (default: one shift, 8 hours)
    pub jwt_lifetime_secs: i64,

    /// Rows per page on list endpoints
    pub page_size: i64,
}

impl WebConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = WebConfig {
            http_port: var("PERNOS_HTTP_PORT", "8080")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PERNOS_HTTP_PORT".to_string()))?,

            db_path: PathBuf::from(var("PERNOS_DB_PATH", "./pernos.db")),

            db_max_connections: var("PERNOS_DB_MAX_CONNECTIONS", "5")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PERNOS_DB_MAX_CONNECTIONS".to_string()))?,

            jwt_secret: lookup("PERNOS_JWT_SECRET").unwrap_or_else(|| {
                // Only suitable for local development
                DEV_JWT_SECRET.to_string()
            }),

            jwt_lifetime_secs: var("PERNOS_JWT_LIFETIME_SECS", "28800")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PERNOS_JWT_LIFETIME_SECS".to_string()))?,

            page_size: var("PERNOS_PAGE_SIZE", "10")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PERNOS_PAGE_SIZE".to_string()))?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("PERNOS_DB_MAX_CONNECTIONS".to_string()));
        }
        if config.jwt_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue("PERNOS_JWT_LIFETIME_SECS".to_string()));
        }
        if config.page_size <= 0 {
            return Err(ConfigError::InvalidValue("PERNOS_PAGE_SIZE".to_string()));
        }
        if config.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingRequired("PERNOS_JWT_SECRET".to_string()));
        }

        Ok(config)
    }

    /// True when the signing secret was never configured.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<WebConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WebConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.db_path, PathBuf::from("./pernos.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.jwt_lifetime_secs, 28_800);
        assert_eq!(config.page_size, 10);
        assert!(config.uses_dev_secret());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PERNOS_HTTP_PORT", "9000"),
            ("PERNOS_DB_PATH", "/var/lib/pernos/store.db"),
            ("PERNOS_JWT_SECRET", "s3cret"),
            ("PERNOS_PAGE_SIZE", "25"),
        ])
        .unwrap();
        assert_eq!(config.http_port, 9000);
        assert_eq!(config.db_path, PathBuf::from("/var/lib/pernos/store.db"));
        assert_eq!(config.page_size, 25);
        assert!(!config.uses_dev_secret());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("PERNOS_HTTP_PORT", "eighty")]),
            Err(ConfigError::InvalidValue(key)) if key == "PERNOS_HTTP_PORT"
        ));
        assert!(matches!(
            load(&[("PERNOS_PAGE_SIZE", "0")]),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            load(&[("PERNOS_JWT_SECRET", "  ")]),
            Err(ConfigError::MissingRequired(_))
        ));
    }
}
