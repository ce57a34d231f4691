//! REST API endpoint handlers for the Observer server.
//!
//! Read handlers take the dashboard read lock only long enough to copy out
//! what they serve. The evolution trigger goes through the simulator so the
//! `Running` guard is honored.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/dashboard` | Full dashboard snapshot |
//! | `GET` | `/api/agents` | List all agents |
//! | `GET` | `/api/agents/:id` | Single agent |
//! | `GET` | `/api/breeding` | Recent breeding events |
//! | `GET` | `/api/audit` | Recent audit entries |
//! | `GET` | `/api/series` | Series samples and sparkline points |
//! | `GET` | `/api/routes` | Remittance routes |
//! | `GET` | `/api/pools` | Stake pools |
//! | `GET` | `/api/evolution` | Evolution phase and proof token |
//! | `POST` | `/api/evolution` | Start an evolution run |
//! | `GET` | `/api/report` | Investor report download |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse};
use chrono::Utc;
use evoswarm_core::evolution::TriggerOutcome;
use evoswarm_core::report::{REPORT_FILENAME, ReportContext};
use evoswarm_types::AgentId;
use uuid::Uuid;

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the headline counters and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dashboard = state.dashboard.read().await;
    let agent_count = dashboard.agents.len();
    let savings = evoswarm_core::report::group_thousands(dashboard.counters.network_savings_usd);
    let active = evoswarm_core::report::group_thousands(dashboard.counters.active_agents);
    let efficiency = evoswarm_core::report::one_decimal(dashboard.counters.efficiency_gain_pct);
    let phase = if dashboard.evolution_phase.is_running() {
        "EVOLVING"
    } else {
        "IDLE"
    };
    drop(dashboard);

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>EvoSwarm Observer</title>
    <style>
        body {{
            background: #0a0f1a;
            color: #e8f4f8;
            font-family: 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #00f5d4; margin-bottom: 0.25rem; }}
        .metric {{
            display: inline-block;
            border: 1px solid #00f5d433;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
        }}
        .metric .label {{ color: #8899a6; font-size: 0.85rem; }}
        .metric .value {{ color: #00f5d4; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #00f5d4; }}
        li {{ padding: 0.3rem 0; }}
    </style>
</head>
<body>
    <h1>EvoSwarm Observer</h1>
    <p>Evolution: <strong>{phase}</strong></p>
    <div>
        <div class="metric"><div class="label">Agents</div><div class="value">{agent_count}</div></div>
        <div class="metric"><div class="label">Network Savings</div><div class="value">${savings}</div></div>
        <div class="metric"><div class="label">Active Agents</div><div class="value">{active}</div></div>
        <div class="metric"><div class="label">Efficiency</div><div class="value">+{efficiency}%</div></div>
    </div>
    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/dashboard">/api/dashboard</a> -- Full snapshot</li>
        <li><a href="/api/agents">/api/agents</a> -- Agent pool</li>
        <li><a href="/api/breeding">/api/breeding</a> -- Breeding events</li>
        <li><a href="/api/audit">/api/audit</a> -- Audit log</li>
        <li><a href="/api/series">/api/series</a> -- Series and sparklines</li>
        <li><a href="/api/routes">/api/routes</a> -- Remittance routes</li>
        <li><a href="/api/pools">/api/pools</a> -- Stake pools</li>
        <li><a href="/api/evolution">/api/evolution</a> -- Evolution status (POST to run)</li>
        <li><a href="/api/report">/api/report</a> -- Investor report</li>
    </ul>
    <p><code>ws://host:port/ws/updates</code> -- Live update stream</p>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// Read-only state
// ---------------------------------------------------------------------------

/// Return the full dashboard snapshot.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.dashboard.snapshot().await;
    Ok(Json(serde_json::to_value(snapshot)?))
}

/// List every agent.
pub async fn list_agents(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dashboard = state.dashboard.read().await;
    Json(serde_json::json!({
        "count": dashboard.agents.len(),
        "average_fitness": dashboard.average_fitness(),
        "agents": dashboard.agents,
    }))
}

/// Return a single agent by id.
pub async fn get_agent(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ObserverError> {
    let id = parse_uuid(&id_str)?;
    let agent_id = AgentId::from(id);

    let dashboard = state.dashboard.read().await;
    let agent = dashboard
        .agents
        .iter()
        .find(|a| a.id == agent_id)
        .ok_or_else(|| ObserverError::NotFound(format!("agent {id}")))?;

    Ok(Json(serde_json::to_value(agent)?))
}

/// List recent breeding events, most recent first.
pub async fn list_breeding(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dashboard = state.dashboard.read().await;
    Json(serde_json::json!({
        "count": dashboard.breeding_events.len(),
        "capacity": dashboard.breeding_events.capacity(),
        "events": dashboard.breeding_events,
    }))
}

/// List recent audit entries, most recent first.
pub async fn list_audit(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dashboard = state.dashboard.read().await;
    let entries = dashboard.audit_log.to_vec();
    Json(serde_json::json!({
        "count": entries.len(),
        "capacity": dashboard.audit_log.capacity(),
        "entries": entries,
    }))
}

/// Return every series with its samples and sparkline points.
pub async fn list_series(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let series = state.dashboard.read().await.series.snapshot();
    Json(serde_json::json!({ "series": series }))
}

/// List the remittance routes.
pub async fn list_routes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dashboard = state.dashboard.read().await;
    Json(serde_json::json!({
        "count": dashboard.routes.len(),
        "routes": dashboard.routes,
    }))
}

/// List the stake pools.
pub async fn list_pools(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dashboard = state.dashboard.read().await;
    Json(serde_json::json!({
        "count": dashboard.stake_pools.len(),
        "pools": dashboard.stake_pools,
    }))
}

// ---------------------------------------------------------------------------
// Evolution
// ---------------------------------------------------------------------------

/// Return the evolution phase and the latest proof token.
pub async fn get_evolution(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dashboard = state.dashboard.read().await;
    Json(serde_json::json!({
        "phase": dashboard.evolution_phase,
        "proof_token": dashboard.proof_token,
        "average_fitness": dashboard.average_fitness(),
        "runs_started": state.simulator.runs_started(),
    }))
}

/// Start an evolution run.
///
/// Returns `202 Accepted` when a run starts, `409 Conflict` when one is
/// already in flight and `503 Service Unavailable` once shutdown began.
pub async fn trigger_evolution(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    match state.simulator.trigger().await {
        TriggerOutcome::Started => Ok((
            StatusCode::ACCEPTED,
            Json(serde_json::json!({ "phase": "running" })),
        )),
        TriggerOutcome::AlreadyRunning => Err(ObserverError::Conflict(
            "an evolution run is already in progress".to_owned(),
        )),
        TriggerOutcome::Closed => Err(ObserverError::Unavailable(
            "the engine is shutting down".to_owned(),
        )),
    }
}

// ---------------------------------------------------------------------------
// GET /api/report -- investor report download
// ---------------------------------------------------------------------------

/// Render the investor report as a plain-text attachment.
pub async fn export_report(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let context = {
        let dashboard = state.dashboard.read().await;
        ReportContext::from_state(&dashboard, state.verified_tx_baseline, Utc::now().date_naive())
    };
    let body = state.report.render(&context)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILENAME}\""),
            ),
        ],
        body,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a UUID from a string, returning an [`ObserverError`] on failure.
fn parse_uuid(s: &str) -> Result<Uuid, ObserverError> {
    s.parse::<Uuid>()
        .map_err(|e| ObserverError::InvalidUuid(format!("{s}: {e}")))
}
