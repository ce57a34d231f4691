//! Evolution simulator.
//!
//! A user-triggered, one-shot transition `Idle -> Running -> Idle`. Starting
//! a run clears the previous proof token; after a fixed delay the completion
//! advances every agent, raises the network counters, composes a new proof
//! token and records one audit entry. Both halves are applied under the
//! dashboard write lock, so the `Running` guard cannot be raced.
//!
//! A started run always completes. There is no cancellation.
//! [`EvolutionSimulator::close`] refuses new runs and waits for the one in
//! flight, so shutdown never drops a half-applied run.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use evoswarm_types::{EvolutionPhase, MAX_SCORE, NetworkCounters, ProofToken};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::audit::{self, SWARM_OPTIMIZER_CONTRACT};
use crate::config::EvolutionConfig;
use crate::state::{DashboardState, DashboardUpdate, SharedDashboard};
use crate::tokens;

/// Audit action recorded for every completed run.
pub const BULK_OPTIMIZATION_ACTION: &str = "Swarm Bulk Optimization";

/// Result of asking the simulator to start a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A run started and its completion is scheduled.
    Started,
    /// A run is already in flight; nothing was scheduled.
    AlreadyRunning,
    /// The simulator was closed for shutdown; nothing was scheduled.
    Closed,
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionSummary {
    /// The new proof token.
    pub proof_token: ProofToken,
    /// Counters after the run.
    pub counters: NetworkCounters,
    /// Floored average fitness after the run.
    pub average_fitness: u32,
    /// Highest agent generation after the run (0 for an empty pool).
    pub max_generation: u32,
}

/// Enter `Running` unless a run is already in flight.
pub fn begin_run(state: &mut DashboardState) -> TriggerOutcome {
    if state.evolution_phase.is_running() {
        return TriggerOutcome::AlreadyRunning;
    }
    state.evolution_phase = EvolutionPhase::Running;
    state.proof_token = None;
    TriggerOutcome::Started
}

/// Apply a run's effects and return to `Idle`.
pub fn complete_run(
    state: &mut DashboardState,
    config: &EvolutionConfig,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> EvolutionSummary {
    for agent in &mut state.agents {
        agent.generation = agent.generation.saturating_add(1);
        agent.resilience = raise_score(agent.resilience, config.resilience_gain.sample(rng));
        agent.speed = raise_score(agent.speed, config.speed_gain.sample(rng));
        agent.fitness = raise_score(agent.fitness, config.fitness_gain.sample(rng));
        agent.genome = tokens::random_genome(rng);
    }

    let counters = &mut state.counters;
    counters.network_savings_usd = counters
        .network_savings_usd
        .saturating_add(u64::from(config.savings_gain.sample(rng)));
    counters.active_agents = counters
        .active_agents
        .saturating_add(u64::from(config.active_agents_gain.sample(rng)));
    let efficiency_step = Decimal::new(i64::from(config.efficiency_gain_hundredths.sample(rng)), 2);
    counters.efficiency_gain_pct = counters
        .efficiency_gain_pct
        .checked_add(efficiency_step)
        .unwrap_or(config.efficiency_ceiling_pct)
        .min(config.efficiency_ceiling_pct);

    let max_generation = state.agents.iter().map(|a| a.generation).max().unwrap_or(0);
    let average_fitness = state.average_fitness();
    let proof_token =
        ProofToken::compose(&tokens::random_genome(rng), max_generation, average_fitness);

    state.audit_log.record(audit::verified_entry(
        BULK_OPTIMIZATION_ACTION,
        SWARM_OPTIMIZER_CONTRACT,
        now,
        rng,
    ));
    state.proof_token = Some(proof_token.clone());
    state.evolution_phase = EvolutionPhase::Idle;

    tracing::info!(
        agents = state.agents.len(),
        max_generation,
        average_fitness,
        savings_usd = state.counters.network_savings_usd,
        efficiency_pct = %state.counters.efficiency_gain_pct,
        proof = %proof_token,
        "evolution run completed"
    );

    EvolutionSummary {
        proof_token,
        counters: state.counters.clone(),
        average_fitness,
        max_generation,
    }
}

fn raise_score(current: u32, gain: u32) -> u32 {
    current.saturating_add(gain).min(MAX_SCORE)
}

/// Completion task bookkeeping, guarded by one lock so that entering
/// `Running` and registering the task happen together.
#[derive(Debug, Default)]
struct InFlight {
    handle: Option<JoinHandle<()>>,
    closed: bool,
}

/// Schedules evolution runs against a shared dashboard.
#[derive(Debug, Clone)]
pub struct EvolutionSimulator {
    dashboard: SharedDashboard,
    config: Arc<EvolutionConfig>,
    rng_seed: Option<u64>,
    runs: Arc<AtomicU64>,
    in_flight: Arc<Mutex<InFlight>>,
}

impl EvolutionSimulator {
    /// Create a simulator. With `rng_seed` set, each run draws from a
    /// deterministic stream derived from the seed and the run number.
    pub fn new(dashboard: SharedDashboard, config: EvolutionConfig, rng_seed: Option<u64>) -> Self {
        Self {
            dashboard,
            config: Arc::new(config),
            rng_seed,
            runs: Arc::new(AtomicU64::new(0)),
            in_flight: Arc::new(Mutex::new(InFlight::default())),
        }
    }

    /// Start a run unless one is in flight or the simulator is closed.
    ///
    /// On `Started` the completion is applied after the configured delay
    /// on a background task.
    pub async fn trigger(&self) -> TriggerOutcome {
        // Held until the completion task is registered.
        let mut in_flight = self.in_flight.lock().await;
        if in_flight.closed {
            tracing::debug!("evolution trigger ignored, simulator closed");
            return TriggerOutcome::Closed;
        }

        let outcome = {
            let mut state = self.dashboard.write().await;
            begin_run(&mut state)
        };
        if outcome == TriggerOutcome::AlreadyRunning {
            tracing::debug!("evolution trigger ignored, run already in flight");
            return outcome;
        }

        self.dashboard.publish(DashboardUpdate::EvolutionStarted);
        let run = self.runs.fetch_add(1, Ordering::Relaxed);
        tracing::info!(run, delay_ms = self.config.delay_ms, "evolution run started");

        let mut rng = match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(run)),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let dashboard = self.dashboard.clone();
        let config = Arc::clone(&self.config);
        let delay = Duration::from_millis(config.delay_ms);

        in_flight.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let (summary, entry) = {
                let mut state = dashboard.write().await;
                let summary = complete_run(&mut state, &config, &mut rng, Utc::now());
                (summary, state.audit_log.latest().cloned())
            };
            if let Some(entry) = entry {
                dashboard.publish(DashboardUpdate::AuditRecorded { entry });
            }
            dashboard.publish(DashboardUpdate::EvolutionCompleted {
                proof_token: summary.proof_token,
                counters: summary.counters,
                average_fitness: summary.average_fitness,
            });
        }));

        outcome
    }

    /// Number of runs started so far.
    pub fn runs_started(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }

    /// Wait for the in-flight run, if any, to complete.
    pub async fn wait_idle(&self) {
        let handle = self.in_flight.lock().await.handle.take();
        join_run(handle).await;
    }

    /// Refuse every later trigger, then wait for the in-flight run.
    pub async fn close(&self) {
        let handle = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight.closed = true;
            in_flight.handle.take()
        };
        join_run(handle).await;
        tracing::debug!("evolution simulator closed");
    }
}

async fn join_run(handle: Option<JoinHandle<()>>) {
    let Some(handle) = handle else {
        return;
    };
    if let Err(e) = handle.await {
        tracing::warn!(error = %e, "evolution run task failed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::seed;

    fn state_with_agents(
        count: usize,
        generation: u32,
        score: u32,
        fitness: u32,
    ) -> DashboardState {
        let config = EngineConfig::default();
        let mut state = seed::empty_state(&config).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        state.agents = (0..count)
            .map(|i| {
                let mut agent = seed::random_agent(&format!("Agent-{i}"), &config.seed, &mut rng);
                agent.generation = generation;
                agent.resilience = score;
                agent.speed = score;
                agent.fitness = fitness;
                agent
            })
            .collect();
        state
    }

    #[test]
    fn begin_clears_proof_and_guards_reentry() {
        let mut state = state_with_agents(2, 1, 50, 50);
        state.proof_token = Some(ProofToken::compose(
            &tokens::random_genome(&mut SmallRng::seed_from_u64(2)),
            1,
            1,
        ));

        assert_eq!(begin_run(&mut state), TriggerOutcome::Started);
        assert_eq!(state.evolution_phase, EvolutionPhase::Running);
        assert!(state.proof_token.is_none());
        assert_eq!(begin_run(&mut state), TriggerOutcome::AlreadyRunning);
        assert_eq!(state.evolution_phase, EvolutionPhase::Running);
    }

    #[test]
    fn six_agents_at_generation_ten_advance_once() {
        let config = EvolutionConfig::default();
        let mut state = state_with_agents(6, 10, 70, 70);
        let mut rng = SmallRng::seed_from_u64(42);

        begin_run(&mut state);
        let summary = complete_run(&mut state, &config, &mut rng, Utc::now());

        assert_eq!(state.evolution_phase, EvolutionPhase::Idle);
        for agent in &state.agents {
            assert_eq!(agent.generation, 11);
            assert!((73..=75).contains(&agent.fitness), "fitness {}", agent.fitness);
            assert!((72..=79).contains(&agent.resilience));
            assert!((72..=79).contains(&agent.speed));
        }
        assert_eq!(summary.max_generation, 11);
        assert!((73..=75).contains(&summary.average_fitness));

        let proof = state.proof_token.as_ref().unwrap();
        assert!(!proof.as_str().is_empty());
        assert!(ProofToken::is_well_formed(proof.as_str()));
        assert!(proof.as_str().contains(":GEN11:"));
        assert_eq!(proof, &summary.proof_token);

        let entry = state.audit_log.latest().unwrap();
        assert_eq!(entry.action, BULK_OPTIMIZATION_ACTION);
        assert_eq!(entry.contract, SWARM_OPTIMIZER_CONTRACT);
    }

    #[test]
    fn scores_and_efficiency_stay_bounded_over_many_runs() {
        let config = EvolutionConfig::default();
        let mut state = state_with_agents(4, 1, 95, 98);
        let mut rng = SmallRng::seed_from_u64(7);

        for run in 1..=60_u32 {
            let savings_before = state.counters.network_savings_usd;
            let agents_before = state.counters.active_agents;
            begin_run(&mut state);
            complete_run(&mut state, &config, &mut rng, Utc::now());

            for agent in &state.agents {
                assert_eq!(agent.generation, run.saturating_add(1));
                assert!(agent.resilience <= MAX_SCORE);
                assert!(agent.speed <= MAX_SCORE);
                assert!(agent.fitness <= MAX_SCORE);
            }
            assert!(state.counters.efficiency_gain_pct <= config.efficiency_ceiling_pct);
            assert!(state.counters.network_savings_usd >= savings_before.saturating_add(1000));
            assert!(state.counters.active_agents >= agents_before.saturating_add(8));
        }
        assert_eq!(state.counters.efficiency_gain_pct, config.efficiency_ceiling_pct);
        assert!(state.agents.iter().all(|a| a.fitness == MAX_SCORE));
    }

    #[test]
    fn empty_pool_still_updates_counters() {
        let config = EvolutionConfig::default();
        let mut state = state_with_agents(0, 1, 0, 0);
        let before = state.counters.clone();
        let mut rng = SmallRng::seed_from_u64(3);

        begin_run(&mut state);
        let summary = complete_run(&mut state, &config, &mut rng, Utc::now());

        assert_eq!(summary.average_fitness, 0);
        assert_eq!(summary.max_generation, 0);
        assert!(summary.proof_token.as_str().ends_with(":GEN0:FIT0"));
        assert!(state.counters.network_savings_usd > before.network_savings_usd);
        assert!(state.counters.efficiency_gain_pct > before.efficiency_gain_pct);
    }

    #[tokio::test(start_paused = true)]
    async fn second_trigger_while_running_is_a_no_op() {
        let dashboard = SharedDashboard::new(state_with_agents(6, 10, 70, 70));
        let simulator =
            EvolutionSimulator::new(dashboard.clone(), EvolutionConfig::default(), Some(9));
        let mut rx = dashboard.subscribe();

        assert_eq!(simulator.trigger().await, TriggerOutcome::Started);
        assert_eq!(simulator.trigger().await, TriggerOutcome::AlreadyRunning);
        assert_eq!(simulator.runs_started(), 1);
        assert!(dashboard.read().await.evolution_phase.is_running());

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(dashboard.read().await.evolution_phase.is_running());

        simulator.wait_idle().await;
        let state = dashboard.read().await;
        assert_eq!(state.evolution_phase, EvolutionPhase::Idle);
        assert!(state.agents.iter().all(|a| a.generation == 11));
        assert_eq!(
            state
                .audit_log
                .iter()
                .filter(|e| e.action == BULK_OPTIMIZATION_ACTION)
                .count(),
            1
        );
        drop(state);

        assert_eq!(rx.recv().await.unwrap(), DashboardUpdate::EvolutionStarted);
        assert!(matches!(rx.recv().await.unwrap(), DashboardUpdate::AuditRecorded { .. }));
        assert!(matches!(
            rx.recv().await.unwrap(),
            DashboardUpdate::EvolutionCompleted { .. }
        ));

        assert_eq!(simulator.trigger().await, TriggerOutcome::Started);
        simulator.wait_idle().await;
        assert_eq!(simulator.runs_started(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn close_waits_for_the_run_and_refuses_new_ones() {
        let dashboard = SharedDashboard::new(state_with_agents(3, 4, 60, 60));
        let simulator =
            EvolutionSimulator::new(dashboard.clone(), EvolutionConfig::default(), None);

        simulator.wait_idle().await;
        assert_eq!(simulator.trigger().await, TriggerOutcome::Started);
        simulator.close().await;

        let state = dashboard.read().await;
        assert_eq!(state.evolution_phase, EvolutionPhase::Idle);
        assert!(state.proof_token.is_some());
        assert!(state.agents.iter().all(|a| a.generation == 5));
        drop(state);

        assert_eq!(simulator.trigger().await, TriggerOutcome::Closed);
        assert_eq!(simulator.runs_started(), 1);
        assert!(!dashboard.read().await.evolution_phase.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn wait_idle_racing_a_trigger_sees_the_run() {
        let dashboard = SharedDashboard::new(state_with_agents(2, 1, 50, 50));
        let simulator =
            EvolutionSimulator::new(dashboard.clone(), EvolutionConfig::default(), Some(4));

        let (outcome, ()) = tokio::join!(simulator.trigger(), simulator.wait_idle());
        assert_eq!(outcome, TriggerOutcome::Started);

        let state = dashboard.read().await;
        assert_eq!(state.evolution_phase, EvolutionPhase::Idle);
        assert!(state.proof_token.is_some());
    }
}
