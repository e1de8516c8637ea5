//! Repository factory for runtime backend selection.
//!
//! This module selects the [`TodoRepository`] implementation from
//! configuration: the MongoDB backend for production, or the in-memory
//! backend for local development and tests.
//!
//! # Example
//!
//! ```ignore
//! use todo_app::infrastructure::{AppConfig, build_repository};
//!
//! let config = AppConfig::from_env()?;
//! let repository = build_repository(&config).await;
//! let todos = repository.list().await;
//! ```

use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::config::AppConfig;
use super::in_memory::InMemoryTodoRepository;
use super::mongo::MongoTodoRepository;
use super::repository::TodoRepository;
use super::store::TodoStore;

// =============================================================================
// Storage Mode
// =============================================================================

/// Storage mode for todo records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// MongoDB storage for production use.
    #[default]
    Mongodb,
    /// In-memory storage, suitable for development and tests.
    InMemory,
}

impl StorageMode {
    /// Returns the canonical configuration spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mongodb => "mongodb",
            Self::InMemory => "in_memory",
        }
    }
}

impl FromStr for StorageMode {
    type Err = StorageModeError;

    /// Parses a storage mode from a string.
    ///
    /// # Errors
    ///
    /// Returns `StorageModeError::Unknown` if the string is not recognized.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::Mongodb),
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            _ => Err(StorageModeError::Unknown(value.to_string())),
        }
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Errors raised when parsing a storage mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageModeError {
    /// The value matches no known storage mode.
    #[error("unknown storage mode {0:?} (expected \"mongodb\" or \"in_memory\")")]
    Unknown(String),
}

// =============================================================================
// Repository Construction
// =============================================================================

/// Builds the configured repository backend.
///
/// Never fails: a MongoDB backend whose store is unreachable is still
/// constructed and simply reports disconnected until the store recovers.
pub async fn build_repository(config: &AppConfig) -> Arc<dyn TodoRepository> {
    match config.storage_mode {
        StorageMode::Mongodb => {
            let store = TodoStore::connect(&config.mongodb_uri, &config.mongodb_database).await;
            Arc::new(MongoTodoRepository::new(store))
        }
        StorageMode::InMemory => {
            tracing::info!("Using in-memory todo repository");
            Arc::new(InMemoryTodoRepository::new())
        }
    }
}
