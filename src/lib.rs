//! Todo Web Service Library
//!
//! This library provides the core functionality for the todo list web
//! service: domain model, MongoDB-backed persistence, and the HTTP API.

pub mod api;
pub mod domain;
pub mod infrastructure;
