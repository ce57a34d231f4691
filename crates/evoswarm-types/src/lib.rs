//! Shared type definitions for the EvoSwarm simulation.
//!
//! This crate is the single source of truth for the data exchanged between
//! the simulation core, the observer API and the dashboard renderer. Types
//! flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for agents, breeding events and audit entries
//! - [`enums`] -- Audit status, evolution phase, series kind, genome bases
//! - [`mock`] -- Display-only genome, hash and proof-of-evolution tokens
//! - [`structs`] -- Entity structs and the dashboard snapshot

pub mod enums;
pub mod ids;
pub mod mock;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{AuditStatus, EvolutionPhase, GenomeBase, SeriesKind};
pub use ids::{AgentId, AuditEntryId, BreedingEventId};
pub use mock::{GENOME_LENGTH, Genome, MOCK_HASH_DIGITS, MockHash, ProofToken};
pub use structs::{
    Agent, AuditLogEntry, BreedingEvent, DashboardSnapshot, MAX_SCORE, NetworkCounters, PathNode,
    Route, SeriesSnapshot, SparkPoint, StakePool,
};
