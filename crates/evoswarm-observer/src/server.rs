//! Observer HTTP server lifecycle management.
//!
//! Provides [`start_server`] which binds to a TCP port and runs the
//! Axum server until the supplied shutdown future resolves.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use evoswarm_core::config::ServerSettings;
use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Configuration for the Observer server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
        }
    }
}

impl From<&ServerSettings> for ServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
        }
    }
}

impl ServerConfig {
    /// Parse the configured host and port into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))
    }
}

/// Start the Observer HTTP server.
///
/// Binds to the configured address, builds the router, and serves
/// requests until `shutdown` resolves. In-flight requests are allowed
/// to finish.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind or the server
/// encounters a fatal I/O error.
pub async fn start_server<F>(
    config: &ServerConfig,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr()?;
    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "Observer server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    info!("Observer server stopped");
    Ok(())
}

/// Errors that can occur when starting or running the Observer server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}
