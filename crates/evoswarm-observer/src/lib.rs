//! Observer API server for the EvoSwarm dashboard engine.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST endpoints** for reading the simulated dashboard (agents,
//!   breeding events, audit log, series, routes, stake pools)
//! - **Evolution trigger** (`POST /api/evolution`)
//! - **Investor report download** (`GET /api/report`)
//! - **`WebSocket` endpoint** (`/ws/updates`) streaming every dashboard
//!   change via [`tokio::sync::broadcast`]
//! - **Minimal HTML status page** (`GET /`)

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::spawn_observer;
pub use state::AppState;
