//! Todo List Web Application
//!
//! A small server-rendered todo list backed by `MongoDB`, with a JSON
//! mirror of the listing for API consumers.
//!
//! # Environment Variables
//!
//! - `MONGODB_URI`: `MongoDB` connection string (default: `mongodb://localhost:27017`)
//! - `MONGODB_DATABASE`: Database name (default: `todo_db`)
//! - `STORAGE_MODE`: `mongodb` (default) | `in_memory`
//! - `SECRET_KEY`: Flash cookie signing material, at least 32 bytes; a
//!   per-process key is generated when unset
//! - `RUST_LOG`: Logging level (e.g., `debug`, `info`, `todo_app=debug`)
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `3000`)

use std::net::SocketAddr;
use std::process;

use axum_extra::extract::cookie::Key;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_app::api::{AppState, create_router};
use todo_app::infrastructure::{AppConfig, build_repository};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_app=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting todo application");

    // Initialize configuration from environment
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            process::exit(1);
        }
    };

    tracing::info!(
        storage_mode = %config.storage_mode,
        database = %config.database_label(),
        "Configuration loaded"
    );

    // from_env guarantees at least 32 bytes of key material
    let cookie_key = match config.secret_key.as_deref() {
        Some(secret) => Key::derive_from(secret.as_bytes()),
        None => {
            tracing::warn!("SECRET_KEY not set; flash cookies will not survive restarts");
            Key::generate()
        }
    };

    let repository = build_repository(&config).await;
    let state = AppState::new(repository, config.database_label(), cookie_key);
    let application = create_router(state);

    let address: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(address) => address,
        Err(error) => {
            tracing::error!(%error, "Invalid server address: {}:{}", config.host, config.port);
            process::exit(1);
        }
    };

    // Start the server
    let listener = match TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "Failed to bind to address {}", address);
            process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    // ConnectInfo feeds the client address fallback of the IP extractor
    if let Err(error) = axum::serve(
        listener,
        application.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    {
        tracing::error!(%error, "Server error");
        process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

/// Resolves once the process is asked to stop.
///
/// Ctrl+C works on every platform; Unix targets also honor SIGTERM,
/// the signal container runtimes send ahead of a kill.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Ctrl+C handler could not be installed");
            // An arm without a listener must never win the select
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "SIGTERM handler could not be installed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!("Ctrl+C received, shutting down"),
        () = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
