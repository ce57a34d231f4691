//! Breeding emitter.
//!
//! On each tick the emitter may pair two agents and record a derived
//! offspring event plus one audit entry. It never mutates the agents it
//! draws. Every tick returns a [`BreedingOutcome`] describing what
//! happened.

use chrono::{DateTime, Utc};
use evoswarm_types::{BreedingEvent, BreedingEventId};
use rand::Rng;

use crate::audit::{self, BREEDING_CONTRACT};
use crate::config::BreedingConfig;
use crate::state::DashboardState;

/// Why a tick produced no event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than two agents in the pool.
    InsufficientAgents,
    /// The probability draw missed.
    ProbabilityMiss,
    /// Both draws picked the same agent.
    SameParent,
}

/// Result of one emitter tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreedingOutcome {
    /// An event was recorded, along with its audit entry.
    Emitted(BreedingEvent),
    /// Nothing was recorded.
    Skipped(SkipReason),
}

impl BreedingOutcome {
    /// The emitted event, if any.
    pub const fn event(&self) -> Option<&BreedingEvent> {
        match self {
            Self::Emitted(event) => Some(event),
            Self::Skipped(_) => None,
        }
    }
}

/// Derive an offspring name from two parent names.
///
/// Takes the part of `parent_a` before its first `-` and the part of
/// `parent_b` after its first `-`. A name without `-` contributes itself
/// whole.
pub fn offspring_name(parent_a: &str, parent_b: &str) -> String {
    let head = parent_a.split_once('-').map_or(parent_a, |(head, _)| head);
    let tail = parent_b.split_once('-').map_or(parent_b, |(_, tail)| tail);
    format!("{head}-{tail}")
}

/// Periodic producer of breeding events.
#[derive(Debug, Clone)]
pub struct BreedingEmitter {
    config: BreedingConfig,
}

impl BreedingEmitter {
    /// Create an emitter with the given tuning.
    pub const fn new(config: BreedingConfig) -> Self {
        Self { config }
    }

    /// The emitter tuning.
    pub const fn config(&self) -> &BreedingConfig {
        &self.config
    }

    /// Run one tick against `state`.
    pub fn tick(
        &self,
        state: &mut DashboardState,
        rng: &mut impl Rng,
        now: DateTime<Utc>,
    ) -> BreedingOutcome {
        let pool = state.agents.len();
        if pool < 2 {
            return BreedingOutcome::Skipped(SkipReason::InsufficientAgents);
        }
        if rng.random::<f64>() >= self.config.probability {
            return BreedingOutcome::Skipped(SkipReason::ProbabilityMiss);
        }

        let first = rng.random_range(0..pool);
        let second = rng.random_range(0..pool);
        if first == second {
            tracing::trace!(index = first, "breeding draw picked the same agent twice");
            return BreedingOutcome::Skipped(SkipReason::SameParent);
        }
        let (Some(parent_a), Some(parent_b)) = (state.agents.get(first), state.agents.get(second))
        else {
            return BreedingOutcome::Skipped(SkipReason::InsufficientAgents);
        };

        let event = BreedingEvent {
            id: BreedingEventId::new(),
            parent_a: parent_a.name.clone(),
            parent_b: parent_b.name.clone(),
            offspring: offspring_name(&parent_a.name, &parent_b.name),
            created_at: now,
            resilience_gain: self.config.resilience_gain.sample(rng),
            speed_gain: self.config.speed_gain.sample(rng),
        };

        tracing::debug!(
            parent_a = %event.parent_a,
            parent_b = %event.parent_b,
            offspring = %event.offspring,
            "breeding event emitted"
        );

        state.breeding_events.push_front(event.clone());
        state.audit_log.record(audit::verified_entry(
            format!("Evolution: {}", event.offspring),
            BREEDING_CONTRACT,
            now,
            rng,
        ));

        BreedingOutcome::Emitted(event)
    }
}
