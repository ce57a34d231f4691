//! Engine binary for the EvoSwarm dashboard.
//!
//! This is the main entry point that wires together the seeded dashboard,
//! the recurring update streams, the evolution simulator and the Observer
//! API. It runs until interrupted, then shuts everything down in order.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from the path given on the command line, or
//!    `evoswarm-config.yaml`, or built-in defaults
//! 2. Initialize structured logging (tracing)
//! 3. Seed the dashboard state
//! 4. Build the shared dashboard and Observer application state
//! 5. Spawn the series ticker and breeding emitter
//! 6. Start the Observer API server
//! 7. Wait for Ctrl-C
//!
//! # Shutdown Sequence
//!
//! 1. Stop the update streams
//! 2. Stop the Observer server and drain its connections
//! 3. Close the evolution simulator, waiting for an in-flight run
//! 4. Write the investor report if `report.output_path` is set

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use evoswarm_core::config::{EngineConfig, LoggingConfig};
use evoswarm_core::report::ReportContext;
use evoswarm_core::runner::UpdateStreams;
use evoswarm_core::seed;
use evoswarm_core::state::SharedDashboard;
use evoswarm_observer::{AppState, ServerConfig};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Config file looked up in the working directory when no path is given.
const DEFAULT_CONFIG_PATH: &str = "evoswarm-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any startup or shutdown step fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let explicit_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(explicit_path.as_deref())?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        series_interval_ms = config.series.tick_interval_ms,
        breeding_interval_ms = config.breeding.tick_interval_ms,
        evolution_delay_ms = config.evolution.delay_ms,
        rng_seed = ?config.seed.rng_seed,
        "evoswarm-engine starting"
    );

    run(config).await?;
    Ok(())
}

async fn run(config: EngineConfig) -> Result<(), EngineError> {
    // 3. Seed the dashboard.
    let mut rng = match config.seed.rng_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let state = seed::seed_dashboard(&config, &mut rng, Utc::now())?;
    info!(
        agents = state.agents.len(),
        audit_entries = state.audit_log.len(),
        "Dashboard seeded"
    );

    // 4. Shared dashboard and application state.
    let dashboard = SharedDashboard::new(state);
    let app_state = Arc::new(AppState::from_config(dashboard.clone(), &config)?);

    // 5. Recurring update streams.
    let streams = UpdateStreams::spawn(&dashboard, &config);

    // 6. Observer API server.
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let observer = if config.server.enabled {
        let server_config = ServerConfig::from(&config.server);
        let signal = async move {
            // A dropped sender also means shutdown.
            let _ = shutdown_rx.changed().await;
        };
        Some(evoswarm_observer::spawn_observer(
            server_config,
            Arc::clone(&app_state),
            signal,
        )?)
    } else {
        info!("Observer server disabled");
        None
    };

    // 7. Run until interrupted.
    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");

    shutdown(
        streams,
        &shutdown_tx,
        observer,
        &app_state,
        config.report.output_path.as_deref(),
    )
    .await
}

/// Stop everything in order and write the report once the state is final.
async fn shutdown(
    streams: UpdateStreams,
    observer_shutdown: &watch::Sender<bool>,
    observer: Option<JoinHandle<()>>,
    app_state: &AppState,
    report_path: Option<&Path>,
) -> Result<(), EngineError> {
    let stats = streams.shutdown().await;

    let _ = observer_shutdown.send(true);
    if let Some(handle) = observer
        && let Err(e) = handle.await
    {
        warn!(error = %e, "Observer task failed");
    }

    // No request can start a run any more; the last one, if any, completes.
    app_state.simulator.close().await;

    if let Some(path) = report_path {
        write_report(app_state, path).await?;
    }

    info!(
        series_ticks = stats.series_ticks,
        breeding_events = stats.breeding_events,
        evolution_runs = app_state.simulator.runs_started(),
        "evoswarm-engine shutdown complete"
    );
    Ok(())
}

/// Load the engine configuration.
///
/// An explicit path must exist. Without one, `evoswarm-config.yaml` in the
/// working directory is used when present and the defaults otherwise.
fn load_config(explicit: Option<&Path>) -> Result<EngineConfig, EngineError> {
    if let Some(path) = explicit {
        return Ok(EngineConfig::from_file(path)?);
    }
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        Ok(EngineConfig::from_file(default_path)?)
    } else {
        Ok(EngineConfig::parse("")?)
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the config.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Render the investor report from the current dashboard and write it out.
async fn write_report(state: &AppState, path: &Path) -> Result<(), EngineError> {
    let context = {
        let dashboard = state.dashboard.read().await;
        ReportContext::from_state(&dashboard, state.verified_tx_baseline, Utc::now().date_naive())
    };
    let body = state.report.render(&context)?;
    tokio::fs::write(path, body).await?;
    info!(path = %path.display(), "Investor report written");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use evoswarm_core::evolution::TriggerOutcome;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("evoswarm-engine-{}-{name}", std::process::id()))
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let result = load_config(Some(Path::new("/nonexistent/evoswarm.yaml")));
        assert!(matches!(result, Err(EngineError::Config { .. })));
    }

    #[test]
    fn explicit_config_path_is_parsed() {
        let path = temp_path("config.yaml");
        std::fs::write(&path, "breeding:\n  probability: 0.25\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!((config.breeding.probability - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.series.tick_interval_ms, 2000);
    }

    #[tokio::test]
    async fn report_is_written_to_output_path() {
        let config = EngineConfig::default();
        let mut rng = SmallRng::seed_from_u64(5);
        let dashboard =
            SharedDashboard::new(seed::seed_dashboard(&config, &mut rng, Utc::now()).unwrap());
        let state = AppState::from_config(dashboard, &config).unwrap();

        let path = temp_path("report.txt");
        write_report(&state, &path).await.unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(body.contains("$847,523 USD"));
        assert!(body.contains("Verified on Ledger"));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_finishes_the_run_before_writing_the_report() {
        let config = EngineConfig::default();
        let mut rng = SmallRng::seed_from_u64(11);
        let dashboard =
            SharedDashboard::new(seed::seed_dashboard(&config, &mut rng, Utc::now()).unwrap());
        let state = AppState::from_config(dashboard.clone(), &config).unwrap();
        let streams = UpdateStreams::spawn(&dashboard, &config);
        let (shutdown_tx, _shutdown_rx) = watch::channel(false);

        assert_eq!(state.simulator.trigger().await, TriggerOutcome::Started);

        let path = temp_path("shutdown-report.txt");
        shutdown(streams, &shutdown_tx, None, &state, Some(&path)).await.unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let proof = dashboard.read().await.proof_token.clone().unwrap();
        assert!(body.contains(proof.as_str()));
        assert!(!body.contains("Verified on Ledger"));
        assert_eq!(state.simulator.trigger().await, TriggerOutcome::Closed);
    }
}
