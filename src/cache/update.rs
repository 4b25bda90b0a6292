//! Partial snapshot updates and their validation.
//!
//! The polling job hands the cache a [`SnapshotUpdate`] containing any subset
//! of the three top-level collections. The type system already rules out the
//! missing-field and wrong-type garbage the cache must not accept, so
//! validation covers the structural inconsistencies the types cannot express:
//! a map key disagreeing with the record's own id, and a route that departs
//! from and arrives at the same terminal.
//!
//! Validation runs before any mutation, so a rejected update leaves the
//! cache exactly as it was.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Slot, Terminal, TerminalId, Vessel, VesselId};

/// Errors rejecting a structurally inconsistent update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// A terminal record is stored under a key that differs from its own id.
    #[error("terminal record keyed {key} carries id {actual}")]
    TerminalIdMismatch { key: TerminalId, actual: TerminalId },

    /// A vessel record is stored under a key that differs from its own id.
    #[error("vessel record keyed {key} carries id {actual}")]
    VesselIdMismatch { key: VesselId, actual: VesselId },

    /// A schedule entry departs from and arrives at the same terminal.
    #[error("schedule route departs from and arrives at {0}")]
    SelfPairedRoute(TerminalId),
}

/// A partial snapshot handed to [`SnapshotCache::ingest`].
///
/// Each field present wholesale replaces the corresponding cached
/// collection; absent fields leave the cached collection untouched. Field
/// names mirror the upstream JSON wire shape (`terminalsById` and friends).
///
/// [`SnapshotCache::ingest`]: super::SnapshotCache::ingest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotUpdate {
    pub terminals_by_id: Option<HashMap<TerminalId, Terminal>>,

    pub vessels_by_id: Option<HashMap<VesselId, Vessel>>,

    /// Departing terminal -> arriving terminal -> scheduled slots.
    /// Slot order within a route is not required; the cache sorts on ingest.
    pub schedule_by_terminal: Option<HashMap<TerminalId, HashMap<TerminalId, Vec<Slot>>>>,
}

impl SnapshotUpdate {
    /// Returns true if the update carries none of the three collections.
    /// An empty update is valid and ingesting it is a no-op.
    pub fn is_empty(&self) -> bool {
        self.terminals_by_id.is_none()
            && self.vessels_by_id.is_none()
            && self.schedule_by_terminal.is_none()
    }

    /// Checks the update for structural inconsistencies.
    ///
    /// # Errors
    ///
    /// Returns the first [`IngestError`] found; which entry is reported
    /// first is unspecified (map iteration order).
    pub fn validate(&self) -> Result<(), IngestError> {
        if let Some(terminals) = &self.terminals_by_id {
            for (key, terminal) in terminals {
                if *key != terminal.id {
                    return Err(IngestError::TerminalIdMismatch {
                        key: *key,
                        actual: terminal.id,
                    });
                }
            }
        }

        if let Some(vessels) = &self.vessels_by_id {
            for (key, vessel) in vessels {
                if *key != vessel.id {
                    return Err(IngestError::VesselIdMismatch {
                        key: *key,
                        actual: vessel.id,
                    });
                }
            }
        }

        if let Some(schedule) = &self.schedule_by_terminal {
            for (departing, routes) in schedule {
                if routes.contains_key(departing) {
                    return Err(IngestError::SelfPairedRoute(*departing));
                }
            }
        }

        Ok(())
    }
}
