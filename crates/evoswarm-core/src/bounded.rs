//! Most-recent-first list with a fixed capacity.
//!
//! Both the breeding history and the audit log use this container. New
//! entries go to the front; once the list is full, the oldest entry falls
//! off the back. The length never exceeds the capacity.

use std::collections::VecDeque;

use serde::Serialize;

/// A bounded, most-recent-first log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BoundedLog<T> {
    #[serde(skip)]
    capacity: usize,
    entries: VecDeque<T>,
}

impl<T> BoundedLog<T> {
    /// Create an empty log holding at most `capacity` entries.
    ///
    /// A capacity of zero yields a log that discards every entry.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Prepend an entry, dropping the oldest entries beyond capacity.
    pub fn push_front(&mut self, entry: T) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Append an entry at the old end if there is room.
    ///
    /// Used when seeding a log in most-recent-first order. Returns `false`
    /// when the log is already full and the entry was discarded.
    pub fn push_back(&mut self, entry: T) -> bool {
        if self.entries.len() >= self.capacity {
            return false;
        }
        self.entries.push_back(entry);
        true
    }

    /// Most recent entry, if any.
    pub fn latest(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Iterate entries from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries retained.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> BoundedLog<T> {
    /// Copy the entries out, most recent first.
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}
