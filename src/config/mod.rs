//! # Roster Configuration
//!
//! Layered configuration for the search stack: built-in defaults, then
//! `config/roster.toml`, then `config/roster.{env}.toml`, then `ROSTER__*`
//! environment variables. `DATABASE_URL` always wins for the connection URL.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use roster_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let page_size = manager.config().pagination.default_page_size;
//! let strategy = manager.config().search.count_strategy;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::constants::{database, pagination};
use crate::repository::CountStrategy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when a caller does not ask for one
    pub default_page_size: u64,
    /// Largest limit the search façade accepts
    pub max_page_size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub count_strategy: CountStrategy,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: database::DEFAULT_DATABASE_URL.to_string(),
            max_connections: database::DEFAULT_MAX_CONNECTIONS,
            min_connections: database::DEFAULT_MIN_CONNECTIONS,
            acquire_timeout_seconds: database::DEFAULT_ACQUIRE_TIMEOUT_SECONDS,
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: pagination::DEFAULT_PAGE_SIZE,
            max_page_size: pagination::MAX_PAGE_SIZE,
        }
    }
}

impl RosterConfig {
    /// Validate configuration for consistency and required fields
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "database.url",
                "database configuration",
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigurationError::invalid_value(
                "database.max_connections",
                "0",
                "pool size must be greater than 0",
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigurationError::invalid_value(
                "database.min_connections",
                self.database.min_connections.to_string(),
                format!(
                    "must not exceed max_connections ({})",
                    self.database.max_connections
                ),
            ));
        }

        if self.database.acquire_timeout_seconds == 0 {
            return Err(ConfigurationError::invalid_value(
                "database.acquire_timeout_seconds",
                "0",
                "acquire timeout must be greater than 0",
            ));
        }

        if self.pagination.default_page_size == 0 {
            return Err(ConfigurationError::invalid_value(
                "pagination.default_page_size",
                "0",
                "page size must be greater than 0",
            ));
        }

        if self.pagination.max_page_size < self.pagination.default_page_size {
            return Err(ConfigurationError::invalid_value(
                "pagination.max_page_size",
                self.pagination.max_page_size.to_string(),
                format!(
                    "must be at least default_page_size ({})",
                    self.pagination.default_page_size
                ),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RosterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pagination.default_page_size, 20);
        assert_eq!(config.pagination.max_page_size, 2000);
        assert_eq!(config.search.count_strategy, CountStrategy::Deferred);
    }

    #[test]
    fn test_zero_pool_rejected() {
        let mut config = RosterConfig::default();
        config.database.max_connections = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), Some("database.max_connections"));
    }

    #[test]
    fn test_min_above_max_connections_rejected() {
        let mut config = RosterConfig::default();
        config.database.min_connections = 20;
        config.database.max_connections = 5;
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), Some("database.min_connections"));
    }

    #[test]
    fn test_page_size_bounds() {
        let mut config = RosterConfig::default();
        config.pagination.default_page_size = 0;
        assert_eq!(
            config.validate().unwrap_err().field(),
            Some("pagination.default_page_size")
        );

        let mut config = RosterConfig::default();
        config.pagination.max_page_size = 10;
        assert_eq!(
            config.validate().unwrap_err().field(),
            Some("pagination.max_page_size")
        );
    }

    #[test]
    fn test_blank_url_rejected() {
        let mut config = RosterConfig::default();
        config.database.url = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::MissingRequiredField { .. })
        ));
    }
}
