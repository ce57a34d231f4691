//! Recurring update streams.
//!
//! The series ticker and the breeding emitter run as two independent tokio
//! tasks with no ordering between them. Each fires its first tick one
//! period after start, takes the dashboard write lock for the duration of
//! the tick, and publishes what changed.
//!
//! [`UpdateStreams`] owns both tasks: [`UpdateStreams::shutdown`] stops
//! them cleanly and reports how many ticks ran; dropping the handle aborts
//! whatever is still alive.

use std::time::Duration;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::breeding::{BreedingEmitter, BreedingOutcome};
use crate::config::EngineConfig;
use crate::state::{DashboardUpdate, SharedDashboard};

/// Seed offsets so the two streams never share a random sequence.
const SERIES_SEED_SALT: u64 = 0x5e41_e5;
const BREEDING_SEED_SALT: u64 = 0xb4ee_d1;

/// Tick counts reported by [`UpdateStreams::shutdown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Series ticker ticks executed.
    pub series_ticks: u64,
    /// Breeding emitter ticks executed, including skipped ones.
    pub breeding_ticks: u64,
    /// Breeding events actually emitted.
    pub breeding_events: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct BreedingCounts {
    ticks: u64,
    events: u64,
}

/// Handle owning the recurring stream tasks.
#[derive(Debug)]
pub struct UpdateStreams {
    shutdown_tx: watch::Sender<bool>,
    series: Option<JoinHandle<u64>>,
    breeding: Option<JoinHandle<BreedingCounts>>,
}

impl UpdateStreams {
    /// Spawn the series ticker and the breeding emitter.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(dashboard: &SharedDashboard, config: &EngineConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let seed = config.seed.rng_seed;

        let series_period = Duration::from_millis(config.series.tick_interval_ms);
        let breeding_period = Duration::from_millis(config.breeding.tick_interval_ms);

        info!(
            series_interval_ms = config.series.tick_interval_ms,
            breeding_interval_ms = config.breeding.tick_interval_ms,
            breeding_probability = config.breeding.probability,
            "starting update streams"
        );

        let series = tokio::spawn(run_series(
            dashboard.clone(),
            series_period,
            stream_rng(seed, SERIES_SEED_SALT),
            shutdown_rx.clone(),
        ));
        let breeding = tokio::spawn(run_breeding(
            dashboard.clone(),
            BreedingEmitter::new(config.breeding.clone()),
            breeding_period,
            stream_rng(seed, BREEDING_SEED_SALT),
            shutdown_rx,
        ));

        Self {
            shutdown_tx,
            series: Some(series),
            breeding: Some(breeding),
        }
    }

    /// Signal both streams to stop and wait for them.
    pub async fn shutdown(mut self) -> StreamStats {
        // Receivers may already be gone if a task panicked.
        let _ = self.shutdown_tx.send(true);

        let mut stats = StreamStats::default();
        if let Some(handle) = self.series.take() {
            match handle.await {
                Ok(ticks) => stats.series_ticks = ticks,
                Err(e) => warn!(error = %e, "series ticker task failed"),
            }
        }
        if let Some(handle) = self.breeding.take() {
            match handle.await {
                Ok(counts) => {
                    stats.breeding_ticks = counts.ticks;
                    stats.breeding_events = counts.events;
                }
                Err(e) => warn!(error = %e, "breeding emitter task failed"),
            }
        }

        info!(
            series_ticks = stats.series_ticks,
            breeding_ticks = stats.breeding_ticks,
            breeding_events = stats.breeding_events,
            "update streams stopped"
        );
        stats
    }
}

impl Drop for UpdateStreams {
    fn drop(&mut self) {
        if let Some(handle) = self.series.take() {
            handle.abort();
        }
        if let Some(handle) = self.breeding.take() {
            handle.abort();
        }
    }
}

fn stream_rng(seed: Option<u64>, salt: u64) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed ^ salt),
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

fn periodic(period: Duration) -> tokio::time::Interval {
    let start = Instant::now().checked_add(period).unwrap_or_else(Instant::now);
    let mut interval = tokio::time::interval_at(start, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn run_series(
    dashboard: SharedDashboard,
    period: Duration,
    mut rng: SmallRng,
    mut shutdown: watch::Receiver<bool>,
) -> u64 {
    let mut interval = periodic(period);
    let mut ticks: u64 = 0;

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = interval.tick() => {}
        }

        let series = {
            let mut state = dashboard.write().await;
            state.series.tick(&mut rng);
            state.series.snapshot()
        };
        dashboard.publish(DashboardUpdate::SeriesTicked { series });
        ticks = ticks.saturating_add(1);
    }

    debug!(ticks, "series ticker exiting");
    ticks
}

async fn run_breeding(
    dashboard: SharedDashboard,
    emitter: BreedingEmitter,
    period: Duration,
    mut rng: SmallRng,
    mut shutdown: watch::Receiver<bool>,
) -> BreedingCounts {
    let mut interval = periodic(period);
    let mut counts = BreedingCounts::default();

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = interval.tick() => {}
        }

        let (outcome, entry) = {
            let mut state = dashboard.write().await;
            let outcome = emitter.tick(&mut state, &mut rng, Utc::now());
            let entry = match outcome {
                BreedingOutcome::Emitted(_) => state.audit_log.latest().cloned(),
                BreedingOutcome::Skipped(_) => None,
            };
            (outcome, entry)
        };
        counts.ticks = counts.ticks.saturating_add(1);

        match outcome {
            BreedingOutcome::Emitted(event) => {
                counts.events = counts.events.saturating_add(1);
                dashboard.publish(DashboardUpdate::BreedingEmitted { event });
                if let Some(entry) = entry {
                    dashboard.publish(DashboardUpdate::AuditRecorded { entry });
                }
            }
            BreedingOutcome::Skipped(reason) => debug!(?reason, "breeding tick skipped"),
        }
    }

    debug!(ticks = counts.ticks, events = counts.events, "breeding emitter exiting");
    counts
}
