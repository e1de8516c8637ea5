//! Domain module for the todo list.
//!
//! This module contains the todo record model, its identifier type,
//! and the connection-state vocabulary shared across the service.

pub mod todo;

pub use todo::{ConnectionStatus, NewTodo, Todo, TodoId, TodoIdError, TodoPatch};
