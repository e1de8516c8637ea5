//! API layer for the todo web service.
//!
//! This module provides the HTTP surface using Axum 0.8: the JSON
//! endpoints, the server-rendered listing page, and the form endpoints
//! that redirect back to it.
//!
//! # Architecture
//!
//! ```text
//! HTTP Request
//!     │
//!     ▼
//! ┌───────────────┐
//! │   Handlers    │ ── extract input, validate, check status
//! └───────────────┘
//!     │
//!     ▼
//! ┌───────────────┐
//! │  Repository   │ ── data operation (non-throwing results)
//! └───────────────┘
//!     │
//!     ▼
//! JSON body · or · redirect + one-shot flash
//! ```
//!
//! # Modules
//!
//! - [`error`]: the JSON error body for the API endpoint
//! - [`extract`]: client address extraction
//! - [`flash`]: one-shot messages carried in a signed cookie
//! - [`handlers`]: Axum handlers for the HTTP endpoints
//! - [`routes`]: route configuration
//! - [`state`]: shared application state
//! - [`views`]: view models for the HTML templates

pub mod error;
pub mod extract;
pub mod flash;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod views;

pub use routes::create_router;
pub use state::AppState;
