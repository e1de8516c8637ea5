//! Route configuration.
//!
//! # Routes
//!
//! | Method | Path | Handler | Description |
//! |--------|------|---------|-------------|
//! | GET | / | `health` | Service health report |
//! | GET | /api | `list_todos_api` | JSON listing with metadata |
//! | GET | /todos | `todos_page` | HTML listing page |
//! | POST | /submittodoitem | `submit_todo` | Create from the add form |
//! | POST | /todos/{id}/toggle | `toggle_todo` | Flip completion |
//! | POST | /todos/{id}/delete | `delete_todo` | Remove a todo |

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    delete_todo, health, list_todos_api, submit_todo, todos_page, toggle_todo,
};
use crate::api::state::AppState;

/// Creates the Axum router with every route and shared middleware.
///
/// Request tracing and a permissive CORS policy are applied to the
/// whole surface; the signing key for flash cookies travels inside
/// `state`.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and API surface
        .route("/", get(health))
        .route("/api", get(list_todos_api))
        // Browser surface
        .route("/todos", get(todos_page))
        .route("/submittodoitem", post(submit_todo))
        .route("/todos/{id}/toggle", post(toggle_todo))
        .route("/todos/{id}/delete", post(delete_todo))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
