//! Store connection manager.
//!
//! This module owns the MongoDB client handle. It establishes the handle
//! from a configured URI and answers connectivity questions with a fresh
//! liveness probe (`ping`) per call.
//!
//! # Connectivity contract
//!
//! - [`TodoStore::connect`] never fails: any problem building the client
//!   or reaching the server is logged, and the store simply reports
//!   [`ConnectionStatus::Disconnected`] afterwards.
//! - [`TodoStore::status`] probes the server every time it is called.
//!   The result is not cached, so it can flip between calls (network
//!   partition, server restart). Callers must check status immediately
//!   before a data operation rather than trusting a prior check.

use bson::doc;
use mongodb::{Client, Collection};

use crate::domain::ConnectionStatus;

/// Connection manager for the todo store.
///
/// Holds the client handle (if one could be constructed) and the target
/// database name. Cloning is cheap: the client shares one connection
/// pool across clones.
#[derive(Clone)]
pub struct TodoStore {
    /// Client handle; `None` when the URI could not be parsed.
    client: Option<Client>,
    /// Target database name.
    database: String,
}

impl TodoStore {
    /// Builds a store from the configured URI and issues an initial
    /// liveness probe, logging the outcome.
    ///
    /// The probe result is informational only; the authoritative answer
    /// is always the next [`TodoStore::status`] call. A server that is
    /// down at startup can come back later and the store will report
    /// connected again without reconstruction.
    pub async fn connect(uri: &str, database: &str) -> Self {
        let store = match Client::with_uri_str(uri).await {
            Ok(client) => Self {
                client: Some(client),
                database: database.to_owned(),
            },
            Err(error) => {
                tracing::error!(%error, "Failed to build store client from URI");
                Self {
                    client: None,
                    database: database.to_owned(),
                }
            }
        };

        match store.status().await {
            ConnectionStatus::Connected => {
                tracing::info!(database = %store.database, "Connected to todo store");
            }
            ConnectionStatus::Disconnected => {
                tracing::warn!(
                    database = %store.database,
                    "Todo store unreachable; operations will fail until it recovers"
                );
            }
        }

        store
    }

    /// Reports current connectivity with a fresh liveness probe.
    ///
    /// Without a client handle this is `Disconnected` with no probe
    /// issued. With one, a `ping` command decides the answer.
    pub async fn status(&self) -> ConnectionStatus {
        let Some(client) = &self.client else {
            return ConnectionStatus::Disconnected;
        };

        match client
            .database(&self.database)
            .run_command(doc! {"ping": 1})
            .await
        {
            Ok(_) => ConnectionStatus::Connected,
            Err(error) => {
                tracing::warn!(%error, "Store liveness probe failed");
                ConnectionStatus::Disconnected
            }
        }
    }

    /// Typed handle to a collection in the configured database, or
    /// `None` when no client handle exists.
    #[must_use]
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Option<Collection<T>> {
        self.client
            .as_ref()
            .map(|client| client.database(&self.database).collection(name))
    }

    /// The configured database name.
    #[must_use]
    pub fn database_name(&self) -> &str {
        &self.database
    }
}

impl std::fmt::Debug for TodoStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TodoStore")
            .field("client", &self.client.as_ref().map(|_| "<mongodb client>"))
            .field("database", &self.database)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// A syntactically valid URI pointing nowhere, with timeouts short
    /// enough that probes fail fast instead of waiting out the driver's
    /// 30-second server selection default.
    const UNREACHABLE_URI: &str =
        "mongodb://127.0.0.1:9/?serverSelectionTimeoutMS=100&connectTimeoutMS=100";

    #[rstest]
    #[tokio::test]
    async fn connect_with_malformed_uri_reports_disconnected() {
        let store = TodoStore::connect("not a uri", "todo_test").await;

        assert_eq!(store.status().await, ConnectionStatus::Disconnected);
    }

    #[rstest]
    #[tokio::test]
    async fn connect_with_unreachable_server_reports_disconnected() {
        let store = TodoStore::connect(UNREACHABLE_URI, "todo_test").await;

        assert_eq!(store.status().await, ConnectionStatus::Disconnected);
    }

    #[rstest]
    #[tokio::test]
    async fn collection_is_none_without_client_handle() {
        let store = TodoStore::connect("not a uri", "todo_test").await;

        assert!(store.collection::<bson::Document>("todos").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn collection_exists_with_client_handle() {
        // Building the handle needs no live server; only probes do.
        let store = TodoStore::connect(UNREACHABLE_URI, "todo_test").await;

        assert!(store.collection::<bson::Document>("todos").is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn database_name_is_preserved() {
        let store = TodoStore::connect(UNREACHABLE_URI, "todo_test").await;

        assert_eq!(store.database_name(), "todo_test");
    }

    #[rstest]
    #[tokio::test]
    async fn debug_output_hides_client_internals() {
        let store = TodoStore::connect(UNREACHABLE_URI, "todo_test").await;
        let debug_str = format!("{store:?}");

        assert!(debug_str.contains("TodoStore"));
        assert!(debug_str.contains("todo_test"));
    }

    #[rstest]
    #[tokio::test]
    #[ignore = "Requires MongoDB instance"]
    async fn status_against_live_server_reports_connected() {
        let store = TodoStore::connect("mongodb://localhost:27017", "todo_test").await;

        assert_eq!(store.status().await, ConnectionStatus::Connected);
    }
}
