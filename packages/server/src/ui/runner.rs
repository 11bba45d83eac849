//! Server startup.

use std::{io, sync::Arc};

use thiserror::Error;
use tokio::net::TcpListener;

use crate::{
    config::ServerConfig,
    domain::RepositoryError,
    infrastructure::repository::{Database, InMemoryUserDirectory},
};

use super::{router::build_router, signal::shutdown_signal, state::AppState};

/// Errors that stop the server from starting or running
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to open database: {0}")]
    Database(#[from] RepositoryError),

    #[error("Failed to bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },

    #[error("Server error: {0}")]
    Serve(io::Error),
}

/// Open storage, bind the listener and serve until a shutdown signal
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let state = if config.ephemeral {
        tracing::warn!("Running with in-memory storage; data is lost on exit");
        AppState::in_memory(Arc::new(InMemoryUserDirectory::new()))
    } else {
        AppState::sqlite(Arc::new(Database::open(&config.database)?))
    };
    let app = build_router(Arc::new(state));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}
