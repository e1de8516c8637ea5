//! Infrastructure module for external services.
//!
//! This module contains the store connection manager, the todo repository
//! implementations, and configuration loading.

pub mod config;
pub mod factory;
pub mod in_memory;
pub mod mongo;
pub mod repository;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use factory::{StorageMode, StorageModeError, build_repository};
pub use in_memory::InMemoryTodoRepository;
pub use mongo::MongoTodoRepository;
pub use repository::TodoRepository;
pub use store::TodoStore;
