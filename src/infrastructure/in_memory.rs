//! In-memory repository implementation.
//!
//! This module provides an in-memory implementation of
//! [`TodoRepository`], used for local development (`STORAGE_MODE=in_memory`)
//! and as the backend for integration tests. It honors the full trait
//! contract, including newest-first listing and the exactly-one delete
//! report, so tests against it exercise the same branches handlers take
//! in production.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{ConnectionStatus, NewTodo, Todo, TodoId, TodoPatch};
use crate::infrastructure::repository::TodoRepository;

/// In-memory implementation of [`TodoRepository`].
///
/// A locked map stands in for the collection. Always connected; the
/// disconnected branches of the contract are exercised by the store-backed
/// implementation.
///
/// # Example
///
/// ```ignore
/// use todo_app::infrastructure::InMemoryTodoRepository;
///
/// let repository = InMemoryTodoRepository::new();
/// repository.create(new_todo).await;
/// let todos = repository.list().await;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<HashMap<TodoId, Todo>>>,
}

impl InMemoryTodoRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list(&self) -> Vec<Todo> {
        let todos = self.todos.read().await;
        let mut records: Vec<Todo> = todos.values().cloned().collect();
        // Ids tiebreak equal timestamps; they are time-ordered themselves.
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        records
    }

    async fn create(&self, new_todo: NewTodo) -> bool {
        let todo = new_todo.into_todo(TodoId::generate(), Utc::now());
        self.todos.write().await.insert(todo.id, todo);
        true
    }

    async fn update(&self, id: &str, patch: TodoPatch) -> bool {
        let Ok(todo_id) = TodoId::parse(id) else {
            tracing::warn!(id, "Rejected malformed identifier");
            return false;
        };

        let mut todos = self.todos.write().await;
        match todos.get_mut(&todo_id) {
            Some(todo) => {
                patch.apply(todo, Utc::now());
                true
            }
            None => false,
        }
    }

    async fn toggle(&self, id: &str) -> Option<Todo> {
        let Ok(todo_id) = TodoId::parse(id) else {
            tracing::warn!(id, "Rejected malformed identifier");
            return None;
        };

        // One write-lock section: the flip is atomic here the same way
        // the pipeline update is on the real store.
        let mut todos = self.todos.write().await;
        let todo = todos.get_mut(&todo_id)?;
        todo.completed = !todo.completed;
        todo.updated_at = Some(Utc::now());
        Some(todo.clone())
    }

    async fn delete(&self, id: &str) -> bool {
        let Ok(todo_id) = TodoId::parse(id) else {
            tracing::warn!(id, "Rejected malformed identifier");
            return false;
        };

        self.todos.write().await.remove(&todo_id).is_some()
    }

    async fn status(&self) -> ConnectionStatus {
        ConnectionStatus::Connected
    }
}
