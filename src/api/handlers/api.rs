//! JSON mirror of the todo listing.
//!
//! The HTML page degrades to an empty listing when the store is down;
//! the JSON surface instead reports the outage explicitly so API
//! consumers never mistake an outage for an empty list.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::domain::Todo;

/// A single todo as exposed over the JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    /// Hex identifier, usable in the toggle/delete URLs.
    pub id: String,
    pub name: String,
    pub description: String,
    pub completed: bool,
    /// RFC 3339 creation time.
    pub created_at: String,
    /// RFC 3339 time of the last mutation, omitted when never mutated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub ip_address: String,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            name: todo.name.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
            created_at: todo.created_at.to_rfc3339(),
            updated_at: todo.updated_at.map(|at| at.to_rfc3339()),
            ip_address: todo.ip_address.clone(),
        }
    }
}

/// Listing metadata composed per response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMetadata {
    pub version: String,
    /// RFC 3339 time at which this response was composed.
    pub last_updated: String,
    pub total_todos: usize,
    /// Configured database name, or `in-memory`.
    pub database: String,
}

/// Body of `GET /api`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiListing {
    pub todos: Vec<TodoResponse>,
    pub metadata: ApiMetadata,
}

/// GET /api - List all todos as JSON, newest first.
///
/// # Errors
///
/// Returns [`ApiError`] with `500 Internal Server Error` when the
/// database probe fails.
///
/// # Response
///
/// - `200 OK` - Listing with metadata
/// - `500 Internal Server Error` - `{"error": "Database unavailable"}`
pub async fn list_todos_api(
    State(state): State<AppState>,
) -> Result<Json<ApiListing>, ApiError> {
    if !state.repository().status().await.is_connected() {
        return Err(ApiError::internal("Database unavailable"));
    }

    let todos = state.repository().list().await;
    let todos: Vec<TodoResponse> = todos.iter().map(TodoResponse::from).collect();

    let metadata = ApiMetadata {
        version: env!("CARGO_PKG_VERSION").to_string(),
        last_updated: Utc::now().to_rfc3339(),
        total_todos: todos.len(),
        database: state.database_name().to_string(),
    };

    Ok(Json(ApiListing { todos, metadata }))
}
