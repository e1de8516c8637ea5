//! Repository trait for todo records.
//!
//! This module defines the boundary between request handlers and
//! persistence. The contract is deliberately non-throwing: operations
//! report failure through empty sequences, booleans, or `None`, with
//! tracing as the side channel carrying the reason. Handlers branch on
//! the result; they never unwrap repository errors because there are
//! none to unwrap.

use async_trait::async_trait;

use crate::domain::{ConnectionStatus, NewTodo, Todo, TodoPatch};

/// CRUD operations over the todos collection.
///
/// Implementations backed by a real store must check connectivity before
/// every operation and absorb all driver errors. `Send + Sync` so the
/// trait object can be shared across request tasks.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All records, newest first (descending `created_at`).
    ///
    /// An empty vector means either "no todos" or "operation failed";
    /// the distinction lives only in the log.
    async fn list(&self) -> Vec<Todo>;

    /// Inserts a new record with `completed = false` and `created_at`
    /// set to now. `true` iff the store acknowledged an inserted
    /// identifier.
    async fn create(&self, new_todo: NewTodo) -> bool;

    /// Applies a partial update to the record with the given external
    /// identifier, stamping `updated_at`. `false` when the identifier is
    /// malformed, matches nothing, or the store rejected the write.
    async fn update(&self, id: &str, patch: TodoPatch) -> bool;

    /// Atomically flips the completion flag and stamps `updated_at`,
    /// returning the post-update record. `None` when the identifier is
    /// malformed, matches nothing, or the store rejected the write.
    async fn toggle(&self, id: &str) -> Option<Todo>;

    /// Removes the record with the given external identifier. `true` iff
    /// exactly one record was removed.
    async fn delete(&self, id: &str) -> bool;

    /// Current connectivity, probed fresh per call on store-backed
    /// implementations.
    async fn status(&self) -> ConnectionStatus;
}
