//! `WebSocket` handler for real-time dashboard update streaming.
//!
//! Clients connect to `GET /ws/updates` and receive every
//! [`DashboardUpdate`] as a JSON text frame. All clients share one
//! broadcast channel.
//!
//! If a client falls behind, lagged messages are skipped and the client
//! resumes from the most recent update.
//!
//! [`DashboardUpdate`]: evoswarm_core::state::DashboardUpdate

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming dashboard updates.
///
/// # Route
///
/// `GET /ws/updates`
pub async fn ws_updates(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket client connected");

    let mut rx = state.subscribe();

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(update) => {
                        let json = match serde_json::to_string(&update) {
                            Ok(j) => j,
                            Err(e) => {
                                warn!(error = %e, "failed to serialize dashboard update");
                                continue;
                            }
                        };
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            debug!("WebSocket client disconnected (send failed)");
                            return;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        debug!(skipped = n, "WebSocket client lagged, skipping ahead");
                    }
                    Err(RecvError::Closed) => {
                        debug!("update channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(error = %e, "WebSocket error");
                        return;
                    }
                    // Client text and binary frames are ignored.
                    _ => {}
                }
            }
        }
    }
}
