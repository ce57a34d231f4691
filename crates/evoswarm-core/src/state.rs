//! Owned dashboard state and its shared handle.
//!
//! [`DashboardState`] is the single owner of every piece of simulated
//! data. It is passed explicitly to the components that mutate it rather
//! than living in globals. [`SharedDashboard`] wraps it in one
//! `RwLock`; every mutation goes through the write half, which keeps the
//! bounded-list and clamped-score invariants intact when the recurring
//! streams and the evolution simulator run on different worker threads.
//!
//! Every change is also announced on a broadcast channel as a
//! [`DashboardUpdate`] so observers can stream it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use evoswarm_types::{
    Agent, AuditLogEntry, BreedingEvent, DashboardSnapshot, EvolutionPhase, NetworkCounters,
    ProofToken, Route, SeriesSnapshot, StakePool,
};
use serde::Serialize;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard, broadcast};

use crate::audit::AuditLog;
use crate::bounded::BoundedLog;
use crate::series::SeriesState;

/// Capacity of the update broadcast channel.
///
/// A subscriber that falls further behind receives
/// [`broadcast::error::RecvError::Lagged`] and skips ahead.
const UPDATE_CHANNEL_CAPACITY: usize = 256;

/// All simulated dashboard data.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Agent pool. Agents are never removed during a session.
    pub agents: Vec<Agent>,
    /// Tracked time series.
    pub series: SeriesState,
    /// Recent breeding events, most recent first.
    pub breeding_events: BoundedLog<BreedingEvent>,
    /// Recent audit entries, most recent first.
    pub audit_log: AuditLog,
    /// Aggregate network counters.
    pub counters: NetworkCounters,
    /// Static remittance routes.
    pub routes: Vec<Route>,
    /// Static stake pools.
    pub stake_pools: Vec<StakePool>,
    /// Evolution simulator phase.
    pub evolution_phase: EvolutionPhase,
    /// Latest proof of evolution; cleared while a run is in flight.
    pub proof_token: Option<ProofToken>,
}

impl DashboardState {
    /// Floored average fitness across the pool, 0 when the pool is empty.
    pub fn average_fitness(&self) -> u32 {
        average_fitness(&self.agents)
    }

    /// Serializable copy of the whole state.
    pub fn snapshot(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        DashboardSnapshot {
            agents: self.agents.clone(),
            breeding_events: self.breeding_events.to_vec(),
            audit_log: self.audit_log.to_vec(),
            counters: self.counters.clone(),
            series: self.series.snapshot(),
            routes: self.routes.clone(),
            stake_pools: self.stake_pools.clone(),
            evolution_phase: self.evolution_phase,
            proof_token: self.proof_token.clone(),
            average_fitness: self.average_fitness(),
            generated_at: now,
        }
    }
}

/// Floored average fitness of `agents`, 0 for an empty slice.
pub fn average_fitness(agents: &[Agent]) -> u32 {
    let Ok(count) = u64::try_from(agents.len()) else {
        return 0;
    };
    if count == 0 {
        return 0;
    }
    let total: u64 = agents.iter().map(|a| u64::from(a.fitness)).sum();
    u32::try_from(total.checked_div(count).unwrap_or(0)).unwrap_or(u32::MAX)
}

/// A change pushed to observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardUpdate {
    /// The series ticker advanced every window.
    SeriesTicked {
        /// Fresh views of every series.
        series: Vec<SeriesSnapshot>,
    },
    /// The breeding emitter recorded an event.
    BreedingEmitted {
        /// The new event.
        event: BreedingEvent,
    },
    /// An audit entry was recorded.
    AuditRecorded {
        /// The new entry.
        entry: AuditLogEntry,
    },
    /// An evolution run started; the previous proof token was cleared.
    EvolutionStarted,
    /// An evolution run completed.
    EvolutionCompleted {
        /// The new proof of evolution.
        proof_token: ProofToken,
        /// Counters after the run.
        counters: NetworkCounters,
        /// Floored average fitness after the run.
        average_fitness: u32,
    },
}

/// Cloneable handle to the dashboard state and its update channel.
#[derive(Debug, Clone)]
pub struct SharedDashboard {
    state: Arc<RwLock<DashboardState>>,
    tx: broadcast::Sender<DashboardUpdate>,
}

impl SharedDashboard {
    /// Take ownership of `state` and open the update channel.
    pub fn new(state: DashboardState) -> Self {
        let (tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(state)),
            tx,
        }
    }

    /// Acquire shared read access.
    pub async fn read(&self) -> RwLockReadGuard<'_, DashboardState> {
        self.state.read().await
    }

    /// Acquire the single writer slot.
    pub async fn write(&self) -> RwLockWriteGuard<'_, DashboardState> {
        self.state.write().await
    }

    /// Serializable copy of the current state.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.state.read().await.snapshot(Utc::now())
    }

    /// Subscribe to dashboard updates.
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardUpdate> {
        self.tx.subscribe()
    }

    /// Publish an update to every subscriber.
    ///
    /// Returns the number of subscribers reached; 0 when nobody listens,
    /// which is not an error.
    pub fn publish(&self, update: DashboardUpdate) -> usize {
        self.tx.send(update).unwrap_or(0)
    }
}
