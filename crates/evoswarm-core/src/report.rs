//! Investor report rendering via `minijinja`.
//!
//! The report is a plain-text summary of the current dashboard. A built-in
//! template ships with the crate; operators can point `report.template_path`
//! at their own file to change the wording without recompiling.

use std::path::Path;

use chrono::NaiveDate;
use minijinja::Environment;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::state::DashboardState;

/// File name offered when the report is downloaded.
pub const REPORT_FILENAME: &str = "EvoSwarm_Investor_Report_2026.txt";

/// Shown in place of the proof token when no run has completed.
pub const PROOF_FALLBACK: &str = "Verified on Ledger";

const TEMPLATE_NAME: &str = "report.txt";
const BUILTIN_TEMPLATE: &str = include_str!("../templates/report.txt.j2");

/// Errors raised while loading or rendering the report template.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Failed to read a template file.
    #[error("failed to read report template: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The template failed to compile or render.
    #[error("report template error: {reason}")]
    Template {
        /// Description of the template failure.
        reason: String,
    },
}

/// Values substituted into the report template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportContext {
    /// Report date, e.g. `October 17, 2026`.
    pub date: String,
    /// Cumulative savings with thousands separators.
    pub network_savings: String,
    /// Efficiency gain with one decimal.
    pub efficiency_gain: String,
    /// Active agents with thousands separators.
    pub active_agents: String,
    /// Audit log length plus the configured baseline.
    pub verified_transactions: u64,
    /// Latest proof token, or [`PROOF_FALLBACK`].
    pub proof: String,
    /// Floored average fitness.
    pub average_fitness: u32,
}

impl ReportContext {
    /// Collect report values from the dashboard.
    pub fn from_state(state: &DashboardState, verified_tx_baseline: u64, today: NaiveDate) -> Self {
        let audit_len = u64::try_from(state.audit_log.len()).unwrap_or(u64::MAX);
        Self {
            date: today.format("%B %-d, %Y").to_string(),
            network_savings: group_thousands(state.counters.network_savings_usd),
            efficiency_gain: one_decimal(state.counters.efficiency_gain_pct),
            active_agents: group_thousands(state.counters.active_agents),
            verified_transactions: audit_len.saturating_add(verified_tx_baseline),
            proof: state
                .proof_token
                .as_ref()
                .map_or_else(|| PROOF_FALLBACK.to_owned(), ToString::to_string),
            average_fitness: state.average_fitness(),
        }
    }
}

/// Format `value` with `,` between groups of three digits.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len().saturating_mul(2));
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && digits.len().saturating_sub(i).checked_rem(3) == Some(0) {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a percentage with one decimal, rounding halves away from zero.
pub fn one_decimal(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}")
}

/// Renders the investor report.
pub struct ReportRenderer {
    env: Environment<'static>,
}

impl std::fmt::Debug for ReportRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportRenderer").finish_non_exhaustive()
    }
}

impl ReportRenderer {
    /// Create a renderer using the built-in template.
    pub fn new() -> Result<Self, ReportError> {
        Self::from_source(BUILTIN_TEMPLATE.to_owned())
    }

    /// Create a renderer from a template file on disk.
    pub fn from_file(path: &Path) -> Result<Self, ReportError> {
        let source = std::fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), "loaded custom report template");
        Self::from_source(source)
    }

    /// Create a renderer from template source text.
    pub fn from_source(source: String) -> Result<Self, ReportError> {
        let mut env = Environment::new();
        env.add_template_owned(TEMPLATE_NAME, source)
            .map_err(|e| ReportError::Template {
                reason: format!("failed to add report template: {e}"),
            })?;
        Ok(Self { env })
    }

    /// Render the report for `context`.
    pub fn render(&self, context: &ReportContext) -> Result<String, ReportError> {
        self.env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| ReportError::Template {
                reason: format!("missing report template: {e}"),
            })?
            .render(context)
            .map_err(|e| ReportError::Template {
                reason: format!("report render failed: {e}"),
            })
    }
}
