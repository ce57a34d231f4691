//! Observer server startup helper for embedding in the engine binary.
//!
//! Provides [`spawn_observer`] which launches the Observer HTTP +
//! `WebSocket` server on a background Tokio task so it runs alongside the
//! recurring update streams.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError};
use crate::state::AppState;

/// Spawn the Observer HTTP server on a background Tokio task.
///
/// The address is validated eagerly so obvious misconfigurations surface
/// before the task is spawned. The server stops when `shutdown` resolves;
/// await the returned handle to wait for in-flight requests to drain.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the configured address is invalid.
pub fn spawn_observer<F>(
    config: ServerConfig,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<JoinHandle<()>, ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = crate::server::start_server(&config, state, shutdown).await {
            tracing::error!(error = %e, "Observer server exited with error");
        }
    });

    tracing::info!(%addr, "Observer server spawned on background task");
    Ok(handle)
}
