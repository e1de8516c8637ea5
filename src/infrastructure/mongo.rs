//! MongoDB repository implementation.
//!
//! This module provides the production implementation of
//! [`TodoRepository`] on top of the [`TodoStore`] connection manager.
//!
//! # Document Shape
//!
//! ```text
//! todos collection
//! {
//!     _id:         ObjectId,
//!     name:        String,
//!     description: String,
//!     completed:   bool,
//!     created_at:  DateTime,
//!     updated_at:  DateTime (absent until first mutation),
//!     ip_address:  String,
//! }
//! ```
//!
//! Every operation probes connectivity first and degrades to its failure
//! result when the store is unreachable: listings come back empty and
//! mutations report `false`/`None`, with the cause in the log. The toggle
//! is a single conditional update (`$not` on the stored flag) so two
//! concurrent toggles on one record cannot overwrite each other from
//! stale reads.

use bson::oid::ObjectId;
use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::options::ReturnDocument;
use serde::{Deserialize, Serialize};

use crate::domain::{ConnectionStatus, NewTodo, Todo, TodoId, TodoPatch};
use crate::infrastructure::repository::TodoRepository;
use crate::infrastructure::store::TodoStore;

use async_trait::async_trait;

/// Name of the single collection holding todo records.
const COLLECTION: &str = "todos";

// =============================================================================
// Persisted Document
// =============================================================================

/// The persisted form of a todo record.
///
/// Kept separate from [`Todo`] so BSON-native types (`ObjectId`, BSON
/// datetimes) never leak into the domain or the JSON API.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    description: String,
    completed: bool,
    created_at: bson::DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<bson::DateTime>,
    ip_address: String,
}

impl TodoDocument {
    /// Builds the insert-side document: fresh identifier, creation time
    /// now, completion false.
    fn from_new(new_todo: NewTodo) -> Self {
        Self {
            id: ObjectId::new(),
            name: new_todo.name,
            description: new_todo.description,
            completed: false,
            created_at: bson::DateTime::now(),
            updated_at: None,
            ip_address: new_todo.ip_address,
        }
    }

    /// Converts into the domain record, normalizing timestamps to UTC
    /// `chrono` values.
    fn into_todo(self) -> Todo {
        Todo {
            id: TodoId::from_object_id(self.id),
            name: self.name,
            description: self.description,
            completed: self.completed,
            created_at: self.created_at.to_chrono(),
            updated_at: self.updated_at.map(bson::DateTime::to_chrono),
            ip_address: self.ip_address,
        }
    }
}

/// Listing sort: newest first, identifiers breaking same-instant ties.
///
/// Stored timestamps have millisecond precision, so back-to-back inserts
/// can collide; the identifier tiebreak keeps the order stable and
/// matches the in-memory backend.
fn newest_first_sort() -> Document {
    doc! {"created_at": -1, "_id": -1}
}

/// Builds the `$set` document for a partial update, always stamping
/// `updated_at`.
fn set_document(patch: &TodoPatch, at: bson::DateTime) -> Document {
    let mut set = doc! {"updated_at": at};
    if let Some(name) = &patch.name {
        set.insert("name", name.clone());
    }
    if let Some(description) = &patch.description {
        set.insert("description", description.clone());
    }
    if let Some(completed) = patch.completed {
        set.insert("completed", completed);
    }
    set
}

// =============================================================================
// MongoDB Todo Repository
// =============================================================================

/// MongoDB implementation of [`TodoRepository`].
///
/// Owns the store connection manager; there is no other handle to the
/// database in the process.
///
/// # Example
///
/// ```ignore
/// use todo_app::infrastructure::{MongoTodoRepository, TodoStore};
///
/// let store = TodoStore::connect("mongodb://localhost:27017", "todo_db").await;
/// let repository = MongoTodoRepository::new(store);
/// let todos = repository.list().await;
/// ```
#[derive(Debug, Clone)]
pub struct MongoTodoRepository {
    /// Connection manager holding the client handle.
    store: TodoStore,
}

impl MongoTodoRepository {
    /// Creates a repository over an established store.
    #[must_use]
    pub const fn new(store: TodoStore) -> Self {
        Self { store }
    }

    /// The collection handle, gated on a fresh connectivity probe.
    ///
    /// `None` means the operation must be skipped; the reason is already
    /// logged here so callers only map it to their failure result.
    async fn connected_collection(
        &self,
        operation: &'static str,
    ) -> Option<Collection<TodoDocument>> {
        match self.store.status().await {
            ConnectionStatus::Connected => self.store.collection(COLLECTION),
            ConnectionStatus::Disconnected => {
                tracing::warn!(operation, "Store disconnected; operation skipped");
                None
            }
        }
    }

    /// Parses an external identifier, logging rejects.
    fn parse_id(id: &str, operation: &'static str) -> Option<TodoId> {
        match TodoId::parse(id) {
            Ok(todo_id) => Some(todo_id),
            Err(error) => {
                tracing::warn!(%error, operation, "Rejected malformed identifier");
                None
            }
        }
    }
}

#[async_trait]
impl TodoRepository for MongoTodoRepository {
    async fn list(&self) -> Vec<Todo> {
        let Some(collection) = self.connected_collection("list").await else {
            return Vec::new();
        };

        let cursor = match collection.find(doc! {}).sort(newest_first_sort()).await {
            Ok(cursor) => cursor,
            Err(error) => {
                tracing::error!(%error, "Failed to query todos");
                return Vec::new();
            }
        };

        match cursor.try_collect::<Vec<TodoDocument>>().await {
            Ok(documents) => documents.into_iter().map(TodoDocument::into_todo).collect(),
            Err(error) => {
                tracing::error!(%error, "Failed to drain todo cursor");
                Vec::new()
            }
        }
    }

    async fn create(&self, new_todo: NewTodo) -> bool {
        let Some(collection) = self.connected_collection("create").await else {
            return false;
        };

        let document = TodoDocument::from_new(new_todo);
        match collection.insert_one(&document).await {
            Ok(result) => result.inserted_id != Bson::Null,
            Err(error) => {
                tracing::error!(%error, "Failed to insert todo");
                false
            }
        }
    }

    async fn update(&self, id: &str, patch: TodoPatch) -> bool {
        let Some(todo_id) = Self::parse_id(id, "update") else {
            return false;
        };
        let Some(collection) = self.connected_collection("update").await else {
            return false;
        };

        let update = doc! {"$set": set_document(&patch, bson::DateTime::now())};
        match collection
            .update_one(doc! {"_id": todo_id.as_object_id()}, update)
            .await
        {
            Ok(result) => result.modified_count > 0,
            Err(error) => {
                tracing::error!(%error, todo_id = %todo_id, "Failed to update todo");
                false
            }
        }
    }

    async fn toggle(&self, id: &str) -> Option<Todo> {
        let todo_id = Self::parse_id(id, "toggle")?;
        let collection = self.connected_collection("toggle").await?;

        // Pipeline update: the negation happens server-side in one
        // write, and `After` returns the state the caller reports on.
        let update = vec![doc! {"$set": {
            "completed": {"$not": "$completed"},
            "updated_at": bson::DateTime::now(),
        }}];
        match collection
            .find_one_and_update(doc! {"_id": todo_id.as_object_id()}, update)
            .return_document(ReturnDocument::After)
            .await
        {
            Ok(Some(document)) => Some(document.into_todo()),
            Ok(None) => {
                tracing::warn!(todo_id = %todo_id, "Toggle target not found");
                None
            }
            Err(error) => {
                tracing::error!(%error, todo_id = %todo_id, "Failed to toggle todo");
                None
            }
        }
    }

    async fn delete(&self, id: &str) -> bool {
        let Some(todo_id) = Self::parse_id(id, "delete") else {
            return false;
        };
        let Some(collection) = self.connected_collection("delete").await else {
            return false;
        };

        match collection
            .delete_one(doc! {"_id": todo_id.as_object_id()})
            .await
        {
            Ok(result) => result.deleted_count == 1,
            Err(error) => {
                tracing::error!(%error, todo_id = %todo_id, "Failed to delete todo");
                false
            }
        }
    }

    async fn status(&self) -> ConnectionStatus {
        self.store.status().await
    }
}
