//! View models for the HTML templates.
//!
//! Templates stay logic-free: every displayed string is pre-formatted
//! here, so the template only loops and branches on booleans.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Utc};

use crate::api::flash::Flash;
use crate::domain::Todo;

/// Timestamp format shown on the listing page.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Renders a template with automatic error handling.
///
/// Rendering failures are logged and turned into a plain 500; they
/// never escape the handler.
pub fn render_page<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(error) => {
            tracing::error!(%error, "Template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering error").into_response()
        }
    }
}

/// Flash banner data.
#[derive(Debug, Clone)]
pub struct FlashView {
    /// CSS class suffix (`success` or `error`).
    pub level: String,
    /// User-facing text.
    pub message: String,
}

impl From<Flash> for FlashView {
    fn from(flash: Flash) -> Self {
        Self {
            level: flash.level.as_str().to_string(),
            message: flash.message,
        }
    }
}

/// Individual todo row for display.
#[derive(Debug, Clone)]
pub struct TodoRow {
    /// External identifier, embedded in the action form URLs.
    pub id: String,
    pub name: String,
    pub description: String,
    pub completed: bool,
    /// Pre-formatted creation time.
    pub created_at: String,
    /// Pre-formatted last mutation time, `-` when never mutated.
    pub updated_at: String,
    pub ip_address: String,
    /// Label of the toggle button, worded for the transition.
    pub toggle_label: String,
}

impl From<&Todo> for TodoRow {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            name: todo.name.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
            created_at: format_timestamp(todo.created_at),
            updated_at: todo
                .updated_at
                .map_or_else(|| "-".to_string(), format_timestamp),
            ip_address: todo.ip_address.clone(),
            toggle_label: if todo.completed {
                "Mark incomplete".to_string()
            } else {
                "Mark complete".to_string()
            },
        }
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// View model for the listing page.
#[derive(Template)]
#[template(path = "todos.html")]
pub struct TodosPage {
    /// Pending flash banner, consumed by this render.
    pub flash: Option<FlashView>,
    /// All todos, newest first.
    pub todos: Vec<TodoRow>,
    /// Number of todos shown.
    pub total: usize,
    /// Database label shown in the footer.
    pub database: String,
}

impl TodosPage {
    /// Builds the page model from the listing and an optional flash.
    #[must_use]
    pub fn new(flash: Option<Flash>, todos: &[Todo], database: impl Into<String>) -> Self {
        Self {
            flash: flash.map(FlashView::from),
            todos: todos.iter().map(TodoRow::from).collect(),
            total: todos.len(),
            database: database.into(),
        }
    }
}
