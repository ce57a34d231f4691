//! Axum router construction for the Observer API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Observer server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws/updates` -- `WebSocket` dashboard update stream
/// - `GET /api/dashboard` -- full dashboard snapshot
/// - `GET /api/agents`, `GET /api/agents/{id}` -- agent pool
/// - `GET /api/breeding`, `GET /api/audit` -- bounded histories
/// - `GET /api/series` -- series samples and sparkline points
/// - `GET /api/routes`, `GET /api/pools` -- static catalog
/// - `GET /api/evolution` -- phase and proof token
/// - `POST /api/evolution` -- start an evolution run
/// - `GET /api/report` -- investor report download
///
/// CORS allows any origin so a locally served dashboard can connect.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/updates", get(ws::ws_updates))
        // REST API
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/agents", get(handlers::list_agents))
        .route("/api/agents/{id}", get(handlers::get_agent))
        .route("/api/breeding", get(handlers::list_breeding))
        .route("/api/audit", get(handlers::list_audit))
        .route("/api/series", get(handlers::list_series))
        .route("/api/routes", get(handlers::list_routes))
        .route("/api/pools", get(handlers::list_pools))
        .route(
            "/api/evolution",
            get(handlers::get_evolution).post(handlers::trigger_evolution),
        )
        .route("/api/report", get(handlers::export_report))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
