//! Service health handler.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;

/// Health report returned by `GET /`.
///
/// `status` is always `ok`: the process answering at all is the liveness
/// signal. Database reachability is reported separately so a monitor can
/// distinguish a dead process from a dead store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// `connected` or `disconnected`, probed fresh for every request.
    pub database: &'static str,
}

/// GET / - Report process and database health.
///
/// # Response
///
/// - `200 OK` - Always, with the database field reflecting the probe
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = state.repository().status().await;

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: database.as_str(),
    })
}
