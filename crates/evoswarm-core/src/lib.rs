//! Simulated-state engine for the EvoSwarm dashboard.
//!
//! This crate owns the periodic update engine behind the dashboard: the
//! series ticker, the breeding emitter, the evolution simulator and the
//! audit log sink, plus the configuration, seed catalog and report they
//! depend on.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `evoswarm-config.yaml` into
//!   strongly-typed structs.
//! - [`bounded`] -- Most-recent-first list with a fixed capacity.
//! - [`series`] -- Sliding-window series, the ticker step and sparkline geometry.
//! - [`breeding`] -- [`BreedingEmitter`] and its per-tick [`BreedingOutcome`].
//! - [`evolution`] -- [`EvolutionSimulator`] and the run state machine.
//! - [`audit`] -- Bounded audit log sink.
//! - [`state`] -- [`DashboardState`] and its shared handle.
//! - [`seed`] -- Initial agents, routes, stake pools and audit entries.
//! - [`tokens`] -- Random genomes and mock hashes.
//! - [`report`] -- Investor report rendering.
//! - [`runner`] -- [`UpdateStreams`], the recurring ticker and emitter tasks.
//!
//! [`BreedingEmitter`]: breeding::BreedingEmitter
//! [`BreedingOutcome`]: breeding::BreedingOutcome
//! [`EvolutionSimulator`]: evolution::EvolutionSimulator
//! [`DashboardState`]: state::DashboardState
//! [`UpdateStreams`]: runner::UpdateStreams

pub mod audit;
pub mod bounded;
pub mod breeding;
pub mod config;
pub mod evolution;
pub mod report;
pub mod runner;
pub mod seed;
pub mod series;
pub mod state;
pub mod tokens;
