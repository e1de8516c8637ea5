//! Application configuration management.
//!
//! This module provides configuration loading from environment variables
//! with explicit error handling.
//!
//! # Design
//!
//! - Configuration is loaded once at startup
//! - Every variable has a default; only malformed values are errors
//! - All values are validated before use
//!
//! # Example
//!
//! ```rust,ignore
//! use todo_app::infrastructure::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("Store URI: {}", config.mongodb_uri);
//! ```

use std::env;
use std::fmt::Display;

use super::factory::StorageMode;

/// Default store connection URI.
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
/// Default database name.
pub const DEFAULT_MONGODB_DATABASE: &str = "todo_db";
/// Default HTTP server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default HTTP server port.
pub const DEFAULT_PORT: u16 = 3000;
/// Minimum length of `SECRET_KEY`, matching the cookie signing key
/// derivation requirement.
pub const MIN_SECRET_KEY_BYTES: usize = 32;

/// Configuration error types.
///
/// Represents errors that can occur when loading configuration
/// from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, message } => {
                write!(formatter, "Invalid value for {key}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Application configuration.
///
/// Values are loaded from environment variables using
/// [`AppConfig::from_env`]; every variable is optional and falls back to
/// the defaults above.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Store connection URI.
    pub mongodb_uri: String,
    /// Database name holding the todos collection.
    pub mongodb_database: String,
    /// Which repository backend to run against.
    pub storage_mode: StorageMode,
    /// Flash-cookie signing key material, when provided.
    pub secret_key: Option<String>,
    /// HTTP server host address.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MONGODB_URI`: store connection URI (default: `mongodb://localhost:27017`)
    /// - `MONGODB_DATABASE`: database name (default: `todo_db`)
    /// - `STORAGE_MODE`: `mongodb` | `in_memory` (default: `mongodb`)
    /// - `SECRET_KEY`: flash-cookie signing key, at least 32 bytes (optional)
    /// - `HOST`: server host (default: `0.0.0.0`)
    /// - `PORT`: server port (default: `3000`)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set but cannot
    /// be parsed, or if `SECRET_KEY` is shorter than 32 bytes.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let mongodb_uri = get_optional_env("MONGODB_URI", DEFAULT_MONGODB_URI);
        let mongodb_database = get_optional_env("MONGODB_DATABASE", DEFAULT_MONGODB_DATABASE);
        let storage_mode = get_optional_env_parsed("STORAGE_MODE", StorageMode::default())?;
        let secret_key = get_env("SECRET_KEY");
        let host = get_optional_env("HOST", DEFAULT_HOST);
        let port = get_optional_env_parsed("PORT", DEFAULT_PORT)?;

        if let Some(key) = &secret_key {
            if key.len() < MIN_SECRET_KEY_BYTES {
                return Err(ConfigError::InvalidValue {
                    key: "SECRET_KEY".to_string(),
                    message: format!("must be at least {MIN_SECRET_KEY_BYTES} bytes"),
                });
            }
        }

        Ok(Self {
            mongodb_uri,
            mongodb_database,
            storage_mode,
            secret_key,
            host,
            port,
        })
    }

    /// Creates a new `AppConfig` with the given values.
    ///
    /// This is useful for testing or when configuration is provided
    /// programmatically.
    #[must_use]
    pub const fn new(
        mongodb_uri: String,
        mongodb_database: String,
        storage_mode: StorageMode,
        secret_key: Option<String>,
        host: String,
        port: u16,
    ) -> Self {
        Self {
            mongodb_uri,
            mongodb_database,
            storage_mode,
            secret_key,
            host,
            port,
        }
    }

    /// The database label reported by the health endpoint and API
    /// metadata. The in-memory backend has no database name, so it is
    /// labelled as such; no connection strings ever leave the process.
    #[must_use]
    pub fn database_label(&self) -> String {
        match self.storage_mode {
            StorageMode::Mongodb => self.mongodb_database.clone(),
            StorageMode::InMemory => "in-memory".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            mongodb_database: DEFAULT_MONGODB_DATABASE.to_string(),
            storage_mode: StorageMode::default(),
            secret_key: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Gets an environment variable, treating empty or whitespace-only
/// values as unset.
fn get_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Gets an optional environment variable with a default value.
fn get_optional_env(key: &str, default: &str) -> String {
    get_env(key).unwrap_or_else(|| default.to_string())
}

/// Gets an optional environment variable and parses it, with a default value.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if the variable is set but cannot
/// be parsed.
fn get_optional_env_parsed<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    get_env(key).map_or_else(
        || Ok(default),
        |value| {
            value.parse().map_err(|error: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: error.to_string(),
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // =========================================================================
    // ConfigError Tests
    // =========================================================================

    #[rstest]
    fn config_error_invalid_value_display() {
        let error = ConfigError::InvalidValue {
            key: "PORT".to_string(),
            message: "must be a number".to_string(),
        };

        assert_eq!(format!("{error}"), "Invalid value for PORT: must be a number");
    }

    #[rstest]
    fn config_error_is_error_trait() {
        fn assert_error<E: std::error::Error>(_: &E) {}

        let error = ConfigError::InvalidValue {
            key: "SECRET_KEY".to_string(),
            message: "too short".to_string(),
        };
        assert_error(&error);
    }

    // =========================================================================
    // AppConfig Tests
    // =========================================================================

    #[rstest]
    fn app_config_default_values() {
        let config = AppConfig::default();

        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(config.mongodb_database, "todo_db");
        assert_eq!(config.storage_mode, StorageMode::Mongodb);
        assert_eq!(config.secret_key, None);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
    }

    #[rstest]
    fn app_config_new_creates_config() {
        let config = AppConfig::new(
            "mongodb://store:27017".to_string(),
            "todos_test".to_string(),
            StorageMode::InMemory,
            Some("0123456789abcdef0123456789abcdef".to_string()),
            "127.0.0.1".to_string(),
            8080,
        );

        assert_eq!(config.mongodb_uri, "mongodb://store:27017");
        assert_eq!(config.mongodb_database, "todos_test");
        assert_eq!(config.storage_mode, StorageMode::InMemory);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[rstest]
    #[case(StorageMode::Mongodb, "todo_db")]
    #[case(StorageMode::InMemory, "in-memory")]
    fn database_label_follows_storage_mode(#[case] mode: StorageMode, #[case] expected: &str) {
        let config = AppConfig {
            storage_mode: mode,
            ..AppConfig::default()
        };

        assert_eq!(config.database_label(), expected);
    }

    #[rstest]
    fn app_config_equality() {
        let config1 = AppConfig::default();
        let config2 = AppConfig::default();
        let config3 = AppConfig {
            port: 9999,
            ..AppConfig::default()
        };

        assert_eq!(config1, config2);
        assert_ne!(config1, config3);
    }

    // Note: AppConfig::from_env tests are omitted because they would
    // require unsafe env::set_var/remove_var in Rust 2024 edition.
    // Integration tests cover environment variable handling.
}
