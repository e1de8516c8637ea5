//! HTTP handlers, grouped by surface.
//!
//! - [`health`] - `GET /` service health report
//! - [`api`] - `GET /api` JSON mirror of the todo listing
//! - [`todos`] - HTML page and the form-driven mutations behind it

pub mod api;
pub mod health;
pub mod todos;

pub use api::list_todos_api;
pub use health::health;
pub use todos::{delete_todo, submit_todo, todos_page, toggle_todo};
