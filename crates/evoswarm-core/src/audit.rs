//! Audit log sink.
//!
//! A bounded, most-recent-first record of notable simulation actions. The
//! breeding emitter and the evolution simulator are the only writers;
//! everything else reads.

use chrono::{DateTime, Utc};
use evoswarm_types::{AuditEntryId, AuditLogEntry, AuditStatus, MockHash};
use rand::Rng;

use crate::bounded::BoundedLog;
use crate::tokens;

/// Contract tag recorded for breeding events.
pub const BREEDING_CONTRACT: &str = "soroban_breeding_engine";

/// Contract tag recorded for bulk evolution runs.
pub const SWARM_OPTIMIZER_CONTRACT: &str = "soroban_swarm_optimizer";

/// Bounded audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLog {
    entries: BoundedLog<AuditLogEntry>,
}

impl AuditLog {
    /// Create an empty log retaining at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: BoundedLog::with_capacity(capacity),
        }
    }

    /// Record an entry as the most recent one.
    pub fn record(&mut self, entry: AuditLogEntry) {
        tracing::debug!(action = %entry.action, contract = %entry.contract, "audit entry recorded");
        self.entries.push_front(entry);
    }

    /// Seed an older entry behind the existing ones.
    pub fn seed(&mut self, entry: AuditLogEntry) -> bool {
        self.entries.push_back(entry)
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&AuditLogEntry> {
        self.entries.latest()
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &AuditLogEntry> {
        self.entries.iter()
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry is held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries retained.
    pub const fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Copy of the entries, most recent first.
    pub fn to_vec(&self) -> Vec<AuditLogEntry> {
        self.entries.to_vec()
    }
}

/// Build a verified entry with a fresh ledger-style hash.
pub fn verified_entry(
    action: impl Into<String>,
    contract: &str,
    at: DateTime<Utc>,
    rng: &mut impl Rng,
) -> AuditLogEntry {
    AuditLogEntry {
        id: AuditEntryId::new(),
        action: action.into(),
        contract: contract.to_owned(),
        status: AuditStatus::Verified,
        created_at: at,
        hash: tokens::random_hash(MockHash::LEDGER_PREFIX, rng),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn record_prepends_and_truncates() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut log = AuditLog::with_capacity(10);
        for i in 0..25 {
            log.record(verified_entry(
                format!("action {i}"),
                BREEDING_CONTRACT,
                Utc::now(),
                &mut rng,
            ));
            assert!(log.len() <= 10);
        }
        assert_eq!(log.len(), 10);
        assert_eq!(log.latest().map(|e| e.action.as_str()), Some("action 24"));
        assert_eq!(log.iter().last().map(|e| e.action.as_str()), Some("action 15"));
    }

    #[test]
    fn verified_entry_has_ledger_hash() {
        let mut rng = SmallRng::seed_from_u64(5);
        let entry = verified_entry("x", SWARM_OPTIMIZER_CONTRACT, Utc::now(), &mut rng);
        assert_eq!(entry.status, AuditStatus::Verified);
        assert_eq!(entry.contract, SWARM_OPTIMIZER_CONTRACT);
        assert!(entry.hash.as_str().starts_with('G'));
    }
}
