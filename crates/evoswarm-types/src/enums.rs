//! Enumeration types for the EvoSwarm simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Audit
// ---------------------------------------------------------------------------

/// Verification status of an audit log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AuditStatus {
    /// The recorded action was confirmed.
    Verified,
    /// The recorded action is awaiting confirmation.
    Pending,
}

// ---------------------------------------------------------------------------
// Evolution
// ---------------------------------------------------------------------------

/// Phase of the evolution simulator state machine.
///
/// The only transitions are `Idle -> Running` (on trigger) and
/// `Running -> Idle` (on completion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EvolutionPhase {
    /// No simulation in flight; a trigger will start one.
    #[default]
    Idle,
    /// A simulation is in flight; triggers are rejected.
    Running,
}

impl EvolutionPhase {
    /// Whether a simulation is currently in flight.
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// One of the four metrics tracked by the series ticker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SeriesKind {
    /// Argentine peso volatility against USD.
    Ars,
    /// Chilean peso volatility against USD.
    Clp,
    /// Mexican peso volatility against USD.
    Mxn,
    /// Network efficiency gain.
    Efficiency,
}

impl SeriesKind {
    /// All tracked series in display order.
    pub const ALL: [Self; 4] = [Self::Ars, Self::Clp, Self::Mxn, Self::Efficiency];

    /// Short display label for the series.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ars => "ARS/USD",
            Self::Clp => "CLP/USD",
            Self::Mxn => "MXN/USD",
            Self::Efficiency => "Efficiency",
        }
    }
}

// ---------------------------------------------------------------------------
// Genome
// ---------------------------------------------------------------------------

/// A single symbol of an agent's display genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenomeBase {
    /// Adenine.
    A,
    /// Thymine.
    T,
    /// Guanine.
    G,
    /// Cytosine.
    C,
    /// Synthetic base X.
    X,
    /// Synthetic base Y.
    Y,
}

impl GenomeBase {
    /// The full genome alphabet.
    pub const ALL: [Self; 6] = [Self::A, Self::T, Self::G, Self::C, Self::X, Self::Y];

    /// Character representation used in genome strings.
    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::T => 'T',
            Self::G => 'G',
            Self::C => 'C',
            Self::X => 'X',
            Self::Y => 'Y',
        }
    }
}
