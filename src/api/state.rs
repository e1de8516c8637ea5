//! Shared application state.
//!
//! This module provides the `AppState` struct handed to every handler.
//! It holds the repository behind a trait object so production and test
//! setups differ only in construction.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::infrastructure::TodoRepository;

/// Application state container.
///
/// Cloned per request by Axum; all fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// The configured repository backend.
    repository: Arc<dyn TodoRepository>,
    /// Database label reported in responses (name or `in-memory`).
    database_name: String,
    /// Signing key for flash cookies.
    cookie_key: Key,
}

impl AppState {
    /// Creates a new `AppState` container.
    #[must_use]
    pub fn new(
        repository: Arc<dyn TodoRepository>,
        database_name: String,
        cookie_key: Key,
    ) -> Self {
        Self {
            repository,
            database_name,
            cookie_key,
        }
    }

    /// Returns a reference to the repository.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn TodoRepository> {
        &self.repository
    }

    /// Returns the database label for responses.
    #[must_use]
    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}

// Lets the signed cookie jar extractor find its key in the state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AppState")
            .field("repository", &"<dyn TodoRepository>")
            .field("database_name", &self.database_name)
            .field("cookie_key", &"<signing key>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryTodoRepository;
    use rstest::rstest;

    fn create_test_state() -> AppState {
        AppState::new(
            Arc::new(InMemoryTodoRepository::new()),
            "todo_test".to_string(),
            Key::generate(),
        )
    }

    #[rstest]
    fn state_exposes_database_name() {
        let state = create_test_state();

        assert_eq!(state.database_name(), "todo_test");
    }

    #[rstest]
    fn state_debug_hides_key_material() {
        let state = create_test_state();
        let debug_str = format!("{state:?}");

        assert!(debug_str.contains("AppState"));
        assert!(debug_str.contains("<signing key>"));
        assert!(!debug_str.contains("cookie_key=["));
    }

    #[rstest]
    fn state_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppState>();
    }

    #[rstest]
    #[tokio::test]
    async fn state_repository_is_usable() {
        let state = create_test_state();

        assert!(state.repository().list().await.is_empty());
    }
}
