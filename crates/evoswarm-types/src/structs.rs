//! Core entity structs for the EvoSwarm simulation.
//!
//! Covers agents, breeding events, audit entries, network counters, the
//! static remittance route and stake pool catalog, and the serialized
//! dashboard snapshot served to renderers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{AuditStatus, EvolutionPhase, SeriesKind};
use crate::ids::{AgentId, AuditEntryId, BreedingEventId};
use crate::mock::{Genome, MockHash, ProofToken};

/// Upper bound for every agent capability score.
pub const MAX_SCORE: u32 = 100;

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// An evolutionary agent in the swarm.
///
/// Created at seeding time and never removed during a session. Only the
/// evolution simulator mutates an agent, and it only ever raises scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Agent {
    /// Unique agent identifier.
    pub id: AgentId,
    /// Display name of the form `<Species>-<greek letter>`.
    pub name: String,
    /// Generation counter (starts at 1).
    pub generation: u32,
    /// Resilience score, 0 to [`MAX_SCORE`].
    pub resilience: u32,
    /// Speed score, 0 to [`MAX_SCORE`].
    pub speed: u32,
    /// Fitness score, 0 to [`MAX_SCORE`].
    pub fitness: u32,
    /// Display-only genome string.
    pub genome: Genome,
}

// ---------------------------------------------------------------------------
// Breeding
// ---------------------------------------------------------------------------

/// A lineage-flavoured event recorded by the breeding emitter.
///
/// Parents are referenced by display name only; the event does not own
/// or mutate the agents it mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BreedingEvent {
    /// Unique event identifier.
    pub id: BreedingEventId,
    /// Display name of the first parent.
    pub parent_a: String,
    /// Display name of the second parent.
    pub parent_b: String,
    /// Derived offspring display name.
    pub offspring: String,
    /// When the event was emitted.
    pub created_at: DateTime<Utc>,
    /// Resilience gain attributed to the offspring.
    pub resilience_gain: u32,
    /// Speed gain attributed to the offspring.
    pub speed_gain: u32,
}

// ---------------------------------------------------------------------------
// Audit
// ---------------------------------------------------------------------------

/// One entry of the bounded audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AuditLogEntry {
    /// Unique entry identifier.
    pub id: AuditEntryId,
    /// Human-readable description of the recorded action.
    pub action: String,
    /// Symbolic contract tag (e.g. `soroban_breeding_engine`).
    pub contract: String,
    /// Verification status.
    pub status: AuditStatus,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
    /// Display-only transaction hash.
    pub hash: MockHash,
}

// ---------------------------------------------------------------------------
// Counters
// ---------------------------------------------------------------------------

/// Aggregate network counters raised by each evolution run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NetworkCounters {
    /// Cumulative savings generated for senders, in whole USD.
    pub network_savings_usd: u64,
    /// Number of active agents across the network.
    pub active_agents: u64,
    /// Efficiency gain versus traditional banks, in percent.
    #[ts(as = "String")]
    pub efficiency_gain_pct: Decimal,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// One hop of a remittance route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PathNode {
    /// Currency or asset code (e.g. `USDC`).
    pub currency: String,
    /// Amount held at this hop.
    #[ts(as = "String")]
    pub amount: Decimal,
    /// Country or network label.
    pub country: String,
    /// Flag or symbol shown next to the hop.
    pub flag: String,
}

/// A candidate remittance path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Route {
    /// Route identifier (e.g. `route-1`).
    pub id: String,
    /// Ordered hops from origin to destination.
    pub nodes: Vec<PathNode>,
    /// Expected slippage in percent.
    #[ts(as = "String")]
    pub slippage_pct: Decimal,
    /// Network fee in XLM.
    #[ts(as = "String")]
    pub fee_xlm: Decimal,
    /// Whether this route is the one currently selected as optimal.
    pub selected: bool,
}

/// A staking pool backing a regional swarm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StakePool {
    /// Pool identifier (e.g. `pool-1`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Number of agents in the pool.
    pub agents: u32,
    /// Total amount staked, in XLM.
    pub total_staked_xlm: u64,
    /// Annual percentage yield.
    #[ts(as = "String")]
    pub apy_pct: Decimal,
    /// Performance score, 0 to 100.
    pub performance: u32,
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// A point of a sparkline projected onto a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SparkPoint {
    /// Horizontal position, 0 to viewport width.
    pub x: f64,
    /// Vertical position, 0 (top) to viewport height.
    pub y: f64,
}

/// Serialized view of one tracked series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SeriesSnapshot {
    /// Which metric this is.
    pub kind: SeriesKind,
    /// Display label.
    pub label: String,
    /// Samples, oldest first.
    pub samples: Vec<f64>,
    /// Smallest sample in the window.
    pub min: f64,
    /// Largest sample in the window.
    pub max: f64,
    /// Samples projected onto the sparkline viewport.
    pub points: Vec<SparkPoint>,
}

/// Everything a renderer needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DashboardSnapshot {
    /// Agent pool.
    pub agents: Vec<Agent>,
    /// Recent breeding events, most recent first.
    pub breeding_events: Vec<BreedingEvent>,
    /// Recent audit entries, most recent first.
    pub audit_log: Vec<AuditLogEntry>,
    /// Aggregate counters.
    pub counters: NetworkCounters,
    /// Tracked series in display order.
    pub series: Vec<SeriesSnapshot>,
    /// Remittance routes.
    pub routes: Vec<Route>,
    /// Stake pools.
    pub stake_pools: Vec<StakePool>,
    /// Evolution simulator phase.
    pub evolution_phase: EvolutionPhase,
    /// Latest proof of evolution, cleared while a run is in flight.
    pub proof_token: Option<ProofToken>,
    /// Floored average agent fitness (0 for an empty pool).
    pub average_fitness: u32,
    /// When the snapshot was taken.
    pub generated_at: DateTime<Utc>,
}
