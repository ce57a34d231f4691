//! Identifiers for agents, breeding events and audit entries.
//!
//! Each is a distinct newtype over a UUID v7, so the ids are time-ordered
//! and an audit entry id can never be passed where an agent id is expected.
//! On the wire they are plain UUID strings.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

macro_rules! uuid_ids {
    ($($(#[$meta:meta])* $name:ident;)+) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(Uuid);

        impl $name {
            /// Fresh time-ordered id.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    )+};
}

uuid_ids! {
    /// An evolutionary agent in the swarm.
    AgentId;
    /// A recorded breeding event.
    BreedingEventId;
    /// An audit log entry.
    AuditEntryId;
}
