//! Shared application state for the Observer API server.
//!
//! [`AppState`] bundles the shared dashboard, the evolution simulator and
//! the report renderer. Handlers only ever read the dashboard, except for
//! the evolution trigger which goes through the simulator.

use std::sync::Arc;

use evoswarm_core::config::EngineConfig;
use evoswarm_core::evolution::EvolutionSimulator;
use evoswarm_core::report::{ReportError, ReportRenderer};
use evoswarm_core::state::{DashboardUpdate, SharedDashboard};
use tokio::sync::broadcast;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The simulated dashboard.
    pub dashboard: SharedDashboard,
    /// Evolution run scheduler bound to the same dashboard.
    pub simulator: EvolutionSimulator,
    /// Investor report renderer.
    pub report: Arc<ReportRenderer>,
    /// Baseline added to the audit log length in the report.
    pub verified_tx_baseline: u64,
}

impl AppState {
    /// Assemble application state from its parts.
    pub const fn new(
        dashboard: SharedDashboard,
        simulator: EvolutionSimulator,
        report: Arc<ReportRenderer>,
        verified_tx_baseline: u64,
    ) -> Self {
        Self {
            dashboard,
            simulator,
            report,
            verified_tx_baseline,
        }
    }

    /// Build the simulator and report renderer for `dashboard` from config.
    ///
    /// Uses `report.template_path` when set, the built-in template otherwise.
    pub fn from_config(
        dashboard: SharedDashboard,
        config: &EngineConfig,
    ) -> Result<Self, ReportError> {
        let report = match &config.report.template_path {
            Some(path) => ReportRenderer::from_file(path)?,
            None => ReportRenderer::new()?,
        };
        let simulator = EvolutionSimulator::new(
            dashboard.clone(),
            config.evolution.clone(),
            config.seed.rng_seed,
        );
        Ok(Self::new(
            dashboard,
            simulator,
            Arc::new(report),
            config.report.verified_tx_baseline,
        ))
    }

    /// Subscribe to dashboard updates.
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardUpdate> {
        self.dashboard.subscribe()
    }
}
