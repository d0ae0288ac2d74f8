//! Configuration Loader
//!
//! Environment-aware loading: defaults, base file, environment file, then
//! environment variable overrides, validated before anything uses them.

use super::error::ConfigResult;
use super::RosterConfig;
use crate::constants::env as env_vars;
use config::{Config, Environment, File, Map};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const BASE_FILE: &str = "roster.toml";

/// Loaded, validated configuration plus where it came from
#[derive(Debug)]
pub struct ConfigManager {
    config: RosterConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with an explicit environment
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_with_sources(config_dir, environment, None)
    }

    /// Like [`load_from_directory_with_env`](Self::load_from_directory_with_env),
    /// but `ROSTER__*` overrides and `DATABASE_URL` are read from `variables`
    /// instead of the process environment
    pub fn load_with_variables(
        config_dir: Option<PathBuf>,
        environment: &str,
        variables: Map<String, String>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_with_sources(config_dir, environment, Some(variables))
    }

    fn load_with_sources(
        config_dir: Option<PathBuf>,
        environment: &str,
        variables: Option<Map<String, String>>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(|| PathBuf::from("config"));

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config = Self::load_and_merge_config(&config_directory, environment, variables)?;
        config.validate()?;

        info!(
            environment = environment,
            max_connections = config.database.max_connections,
            max_page_size = config.pagination.max_page_size,
            count_strategy = ?config.search.count_strategy,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// ROSTER_ENV || APP_ENV || 'development'
    fn detect_environment() -> String {
        env::var(env_vars::ROSTER_ENV)
            .or_else(|_| env::var(env_vars::APP_ENV))
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
    }

    /// `variables` of `None` means the process environment
    fn load_and_merge_config(
        config_directory: &Path,
        environment: &str,
        variables: Option<Map<String, String>>,
    ) -> ConfigResult<RosterConfig> {
        let base_file = config_directory.join(BASE_FILE);
        let env_file = config_directory.join(format!("roster.{environment}.toml"));
        debug!(
            base_present = base_file.exists(),
            environment_present = env_file.exists(),
            "Resolved configuration files"
        );

        let database_url = match &variables {
            Some(vars) => vars.get(env_vars::DATABASE_URL).cloned(),
            None => env::var(env_vars::DATABASE_URL).ok(),
        };

        let merged = Config::builder()
            .add_source(Config::try_from(&RosterConfig::default())?)
            .add_source(File::from(base_file).required(false))
            .add_source(File::from(env_file).required(false))
            .add_source(
                Environment::with_prefix(env_vars::CONFIG_PREFIX)
                    .prefix_separator(env_vars::CONFIG_SEPARATOR)
                    .separator(env_vars::CONFIG_SEPARATOR)
                    .try_parsing(true)
                    .source(variables),
            )
            .set_override_option("database.url", database_url)?
            .build()?;

        Ok(merged.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::CountStrategy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_directory_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::load_from_directory_with_env(
            Some(dir.path().join("absent")),
            "test",
        )
        .unwrap();

        assert_eq!(manager.environment(), "test");
        assert_eq!(manager.config().pagination.default_page_size, 20);
        assert_eq!(manager.config().pagination.max_page_size, 2000);
    }

    #[test]
    fn test_environment_file_overrides_base() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("roster.toml"),
            "[pagination]\ndefault_page_size = 50\nmax_page_size = 500\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("roster.test.toml"),
            "[pagination]\nmax_page_size = 100\n\n[search]\ncount_strategy = \"speculative\"\n",
        )
        .unwrap();

        let manager =
            ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test")
                .unwrap();

        let config = manager.config();
        assert_eq!(config.pagination.default_page_size, 50);
        assert_eq!(config.pagination.max_page_size, 100);
        assert_eq!(config.search.count_strategy, CountStrategy::Speculative);
    }

    #[test]
    fn test_invalid_file_fails_validation() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("roster.toml"),
            "[database]\nmax_connections = 0\n",
        )
        .unwrap();

        let err = ConfigManager::load_from_directory_with_env(
            Some(dir.path().to_path_buf()),
            "development",
        )
        .unwrap_err();

        assert_eq!(err.field(), Some("database.max_connections"));
    }
}
