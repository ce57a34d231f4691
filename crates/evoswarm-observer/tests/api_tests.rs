//! Integration tests for the Observer API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use evoswarm_core::config::EngineConfig;
use evoswarm_core::seed;
use evoswarm_core::state::{DashboardUpdate, SharedDashboard};
use evoswarm_observer::router::build_router;
use evoswarm_observer::state::AppState;
use evoswarm_types::ProofToken;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde_json::Value;
use tower::ServiceExt;

fn make_test_state() -> Arc<AppState> {
    let mut config = EngineConfig::default();
    config.seed.rng_seed = Some(2026);
    let mut rng = SmallRng::seed_from_u64(2026);
    let dashboard =
        SharedDashboard::new(seed::seed_dashboard(&config, &mut rng, Utc::now()).unwrap());
    Arc::new(AppState::from_config(dashboard, &config).unwrap())
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get_json(state: &Arc<AppState>, path: &str) -> (StatusCode, Value) {
    let response = build_router(Arc::clone(state))
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn post_evolution(state: &Arc<AppState>) -> StatusCode {
    build_router(Arc::clone(state))
        .oneshot(
            Request::post("/api/evolution")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let state = make_test_state();
    let response = build_router(state)
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
    let body = body_to_string(response.into_body()).await;
    assert!(body.contains("EvoSwarm Observer"));
    assert!(body.contains("$847,523"));
}

#[tokio::test]
async fn test_get_dashboard() {
    let state = make_test_state();
    let (status, json) = get_json(&state, "/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["agents"].as_array().unwrap().len(), 6);
    assert_eq!(json["audit_log"].as_array().unwrap().len(), 3);
    assert_eq!(json["series"].as_array().unwrap().len(), 4);
    assert_eq!(json["evolution_phase"], "idle");
    assert!(json["proof_token"].is_null());
    assert_eq!(json["counters"]["network_savings_usd"], 847_523);
}

#[tokio::test]
async fn test_list_agents() {
    let state = make_test_state();
    let (status, json) = get_json(&state, "/api/agents").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 6);
    assert_eq!(json["agents"][0]["name"], "Quetzal-α");
    assert_eq!(json["agents"][0]["genome"].as_str().unwrap().len(), 16);
}

#[tokio::test]
async fn test_get_agent_by_id() {
    let state = make_test_state();
    let id = state.dashboard.read().await.agents[1].id;

    let (status, json) = get_json(&state, &format!("/api/agents/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Condor-β");
}

#[tokio::test]
async fn test_get_agent_not_found() {
    let state = make_test_state();
    let id = uuid::Uuid::now_v7();

    let (status, json) = get_json(&state, &format!("/api/agents/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_get_agent_invalid_uuid() {
    let state = make_test_state();
    let (status, _) = get_json(&state, "/api/agents/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_breeding_and_audit_histories() {
    let state = make_test_state();

    let (status, json) = get_json(&state, "/api/breeding").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 0);
    assert_eq!(json["capacity"], 5);

    let (status, json) = get_json(&state, "/api/audit").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 3);
    assert_eq!(json["capacity"], 10);
    assert_eq!(json["entries"][0]["contract"], "soroban_evo_verify_v2");
    assert_eq!(json["entries"][0]["status"], "verified");
}

#[tokio::test]
async fn test_series_include_sparkline_points() {
    let state = make_test_state();
    let (status, json) = get_json(&state, "/api/series").await;

    assert_eq!(status, StatusCode::OK);
    let series = json["series"].as_array().unwrap();
    assert_eq!(series.len(), 4);
    assert_eq!(series[0]["label"], "ARS/USD");
    for entry in series {
        assert_eq!(entry["samples"].as_array().unwrap().len(), 10);
        assert_eq!(entry["points"].as_array().unwrap().len(), 10);
    }
}

#[tokio::test]
async fn test_routes_and_pools() {
    let state = make_test_state();

    let (status, json) = get_json(&state, "/api/routes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 3);
    let selected: Vec<&Value> = json["routes"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["selected"] == true)
        .collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0]["id"], "route-1");

    let (status, json) = get_json(&state, "/api/pools").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 3);
    assert_eq!(json["pools"][1]["name"], "Swarm Azteca");
}

#[tokio::test(start_paused = true)]
async fn test_trigger_evolution_then_conflict() {
    let state = make_test_state();
    let mut rx = state.subscribe();

    assert_eq!(post_evolution(&state).await, StatusCode::ACCEPTED);
    assert_eq!(post_evolution(&state).await, StatusCode::CONFLICT);

    let (_, json) = get_json(&state, "/api/evolution").await;
    assert_eq!(json["phase"], "running");
    assert!(json["proof_token"].is_null());
    assert_eq!(json["runs_started"], 1);

    state.simulator.wait_idle().await;

    let (_, json) = get_json(&state, "/api/evolution").await;
    assert_eq!(json["phase"], "idle");
    assert!(ProofToken::is_well_formed(json["proof_token"].as_str().unwrap()));

    let (_, json) = get_json(&state, "/api/audit").await;
    assert_eq!(json["count"], 4);
    assert_eq!(json["entries"][0]["action"], "Swarm Bulk Optimization");

    assert_eq!(rx.recv().await.unwrap(), DashboardUpdate::EvolutionStarted);
}

#[tokio::test]
async fn test_trigger_after_close_is_unavailable() {
    let state = make_test_state();
    state.simulator.close().await;

    assert_eq!(post_evolution(&state).await, StatusCode::SERVICE_UNAVAILABLE);
    let (_, json) = get_json(&state, "/api/evolution").await;
    assert_eq!(json["phase"], "idle");
    assert_eq!(json["runs_started"], 0);
}

#[tokio::test]
async fn test_export_report_is_attachment() {
    let state = make_test_state();
    let response = build_router(Arc::clone(&state))
        .oneshot(Request::get("/api/report").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("EvoSwarm_Investor_Report_2026.txt"));

    let body = body_to_string(response.into_body()).await;
    assert!(body.contains("$847,523 USD"));
    assert!(body.contains("Verified Transactions (Soroban): 1253"));
    assert!(body.contains("Latest Proof of Evolution: Verified on Ledger"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let state = make_test_state();
    let response = build_router(state)
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
