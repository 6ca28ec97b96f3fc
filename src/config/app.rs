//! Application configuration loading from config.toml
//!
//! `AppConfig` plays the role of the application object: it carries the
//! testing and debug flags, the connection string and the log level. The file
//! is optional; every field has a default, and `DATABASE_URL` in the
//! environment takes precedence over the configured connection string.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Connection string used when neither the environment nor the config file names one
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/products.sqlite?mode=rwc";

/// Configuration file read when `CONFIG_PATH` is not set
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Running under a test harness
    pub testing: bool,
    /// Verbose logging
    pub debug: bool,
    /// Connection string, overridden by `DATABASE_URL`
    pub database_url: Option<String>,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Configuration for tests: an in-memory SQLite store and quiet logging.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            testing: true,
            debug: false,
            database_url: Some("sqlite::memory:".to_string()),
            log_level: Some("error".to_string()),
        }
    }

    /// Resolves the connection string: `DATABASE_URL`, then the config file,
    /// then [`DEFAULT_DATABASE_URL`].
    #[must_use]
    pub fn database_url(&self) -> String {
        resolve_database_url(std::env::var("DATABASE_URL").ok(), self.database_url.as_deref())
    }

    /// Tracing filter to fall back on when `RUST_LOG` is unset.
    #[must_use]
    pub fn log_level(&self) -> &str {
        match (&self.log_level, self.debug) {
            (Some(level), _) => level.as_str(),
            (None, true) => "debug",
            (None, false) => "info",
        }
    }
}

fn resolve_database_url(from_env: Option<String>, configured: Option<&str>) -> String {
    from_env
        .filter(|url| !url.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Loads application configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid or a field has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads `.env`, then the config file named by `CONFIG_PATH` (default
/// `config.toml`). A missing file yields the default configuration.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config_or_default(path)
}

/// Loads the config file at `path`, or the default configuration if there is
/// no file there.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        let config = load_config(path_ref)?;
        tracing::info!("Loaded configuration from {}", path_ref.display());
        Ok(config)
    } else {
        tracing::info!(
            "No configuration file at {}, using defaults",
            path_ref.display()
        );
        Ok(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_app_config() {
        let toml_str = r#"
            testing = true
            debug = true
            database_url = "sqlite://catalog.sqlite?mode=rwc"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!(config.testing);
        assert!(config.debug);
        assert_eq!(
            config.database_url.as_deref(),
            Some("sqlite://catalog.sqlite?mode=rwc")
        );
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_explicit_log_level_wins_over_debug() {
        let config: AppConfig = toml::from_str("debug = true\nlog_level = \"warn\"").unwrap();
        assert_eq!(config.log_level(), "warn");
    }

    #[test]
    fn test_database_url_resolution_order() {
        assert_eq!(
            resolve_database_url(Some("postgres://env".to_string()), Some("sqlite::memory:")),
            "postgres://env"
        );
        assert_eq!(
            resolve_database_url(Some("  ".to_string()), Some("sqlite::memory:")),
            "sqlite::memory:"
        );
        assert_eq!(resolve_database_url(None, None), DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_load_config_reports_bad_toml() {
        let path = std::env::temp_dir().join(format!("product-catalog-{}.toml", std::process::id()));
        std::fs::write(&path, "testing = \"not a bool\"").unwrap();

        let result = load_config(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_config_file_falls_back_to_defaults() {
        let config = load_config_or_default("/nonexistent/product-catalog.toml").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(!config.testing);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_existing_config_file_is_loaded() {
        let path = std::env::temp_dir().join(format!(
            "product-catalog-ok-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "debug = true\nlog_level = \"trace\"").unwrap();

        let result = load_config_or_default(&path);
        std::fs::remove_file(&path).unwrap();
        let config = result.unwrap();
        assert!(config.debug);
        assert_eq!(config.log_level(), "trace");
    }

    #[test]
    fn test_testing_config() {
        let config = AppConfig::for_testing();
        assert!(config.testing);
        assert!(!config.debug);
        assert_eq!(config.database_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(config.log_level(), "error");
    }

    #[test]
    fn test_default_database_url_lives_under_data() {
        assert_eq!(resolve_database_url(None, None), "sqlite://data/products.sqlite?mode=rwc");
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/product-catalog.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
