//! The snapshot cache service object.
//!
//! One `SnapshotCache` is constructed at process start and shared by
//! reference (typically behind an `Arc`) between the polling job, which has
//! write access through [`SnapshotCache::ingest`], and request handlers,
//! which read synchronously. A `std::sync::RwLock` guards the snapshot:
//! reads never suspend, and the ingest critical section is a plain merge
//! with no await points, so writers hold the lock only briefly.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::types::{Slot, Terminal, TerminalId, Vessel, VesselId};

use super::update::{IngestError, SnapshotUpdate};

/// The cached snapshot: the latest known state of each collection.
///
/// Each collection is empty until first ingested. Once ingested, a
/// collection is internally consistent as of its last update, because
/// ingest replaces it wholesale rather than merging per key.
#[derive(Debug, Default)]
struct Snapshot {
    terminals: HashMap<TerminalId, Terminal>,
    vessels: HashMap<VesselId, Vessel>,
    schedule: HashMap<TerminalId, HashMap<TerminalId, Vec<Slot>>>,
}

/// Shared cache of the latest ingested terminal, vessel, and schedule data.
///
/// Reads always observe the most recent completed ingest. Slots within a
/// route are kept sorted ascending by scheduled departure time, sorted once
/// at ingest so every read is a plain clone.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    inner: RwLock<Snapshot>,
}

impl SnapshotCache {
    /// Creates an empty cache. All reads return empty collections until the
    /// first ingest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a partial update into the cache.
    ///
    /// Shallow-merge semantics: each collection present in the update
    /// wholesale replaces the cached one; absent collections are left
    /// untouched. Re-ingesting an identical update has no observable
    /// effect.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestError`] if the update is structurally
    /// inconsistent (see [`SnapshotUpdate::validate`]). Validation runs
    /// before any mutation, so a rejected update changes nothing.
    pub fn ingest(&self, update: SnapshotUpdate) -> Result<(), IngestError> {
        update.validate()?;

        let SnapshotUpdate {
            terminals_by_id,
            vessels_by_id,
            schedule_by_terminal,
        } = update;

        let mut snapshot = self.write();

        if let Some(terminals) = terminals_by_id {
            debug!(count = terminals.len(), "ingested terminals");
            snapshot.terminals = terminals;
        }

        if let Some(vessels) = vessels_by_id {
            debug!(count = vessels.len(), "ingested vessels");
            snapshot.vessels = vessels;
        }

        if let Some(mut schedule) = schedule_by_terminal {
            // Sort once here so reads never have to.
            for routes in schedule.values_mut() {
                for slots in routes.values_mut() {
                    slots.sort_by_key(|slot| slot.departure_time);
                }
            }
            debug!(routes = schedule.len(), "ingested schedule");
            snapshot.schedule = schedule;
        }

        Ok(())
    }

    /// Returns the slots for a departing/arriving terminal pair, sorted
    /// ascending by scheduled departure time. Empty if the pair is unknown.
    pub fn get_schedule(&self, departing: TerminalId, arriving: TerminalId) -> Vec<Slot> {
        self.read()
            .schedule
            .get(&departing)
            .and_then(|routes| routes.get(&arriving))
            .cloned()
            .unwrap_or_default()
    }

    /// Returns all known vessels. Empty before the first vessel ingest.
    pub fn get_vessels(&self) -> HashMap<VesselId, Vessel> {
        self.read().vessels.clone()
    }

    /// Returns a single vessel, or `None` if unknown.
    pub fn get_vessel(&self, id: VesselId) -> Option<Vessel> {
        self.read().vessels.get(&id).cloned()
    }

    /// Returns all known terminals. Empty before the first terminal ingest.
    pub fn get_terminals(&self) -> HashMap<TerminalId, Terminal> {
        self.read().terminals.clone()
    }

    /// Returns a single terminal, or `None` if unknown.
    pub fn get_terminal(&self, id: TerminalId) -> Option<Terminal> {
        self.read().terminals.get(&id).cloned()
    }

    // A poisoned lock means a panic elsewhere while holding the guard. The
    // snapshot cannot be logically torn by that (mutation is wholesale map
    // replacement), so recover the guard rather than propagate the panic.
    fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TerminalCapabilities;
    use chrono::DateTime;
    use proptest::prelude::*;

    fn terminal(id: u32, name: &str) -> Terminal {
        Terminal {
            id: TerminalId(id),
            name: name.to_string(),
            capabilities: TerminalCapabilities::default(),
            bulletins: Vec::new(),
            mates: Vec::new(),
        }
    }

    fn vessel(id: u32, name: &str) -> Vessel {
        Vessel {
            id: VesselId(id),
            name: name.to_string(),
            position: None,
            heading: None,
            speed: None,
            at_dock: false,
        }
    }

    fn slot(timestamp: i64) -> Slot {
        Slot {
            departure_time: DateTime::from_timestamp(timestamp, 0).unwrap(),
            capacity: None,
            cancelled: false,
            delay_minutes: 0,
        }
    }

    fn vessels_update(vessels: &[(u32, &str)]) -> SnapshotUpdate {
        SnapshotUpdate {
            vessels_by_id: Some(
                vessels
                    .iter()
                    .map(|(id, name)| (VesselId(*id), vessel(*id, name)))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    fn schedule_update(departing: u32, arriving: u32, slots: Vec<Slot>) -> SnapshotUpdate {
        SnapshotUpdate {
            schedule_by_terminal: Some(HashMap::from([(
                TerminalId(departing),
                HashMap::from([(TerminalId(arriving), slots)]),
            )])),
            ..Default::default()
        }
    }

    // ─── Read paths ───

    #[test]
    fn empty_cache_reads_return_nothing() {
        let cache = SnapshotCache::new();
        assert!(cache.get_terminals().is_empty());
        assert!(cache.get_vessels().is_empty());
        assert!(cache.get_terminal(TerminalId(1)).is_none());
        assert!(cache.get_vessel(VesselId(1)).is_none());
        assert!(cache.get_schedule(TerminalId(1), TerminalId(2)).is_empty());
    }

    /// The scenario from the upstream feed: ingest one vessel, read it back
    /// by id, and miss on an unknown id.
    #[test]
    fn ingest_then_read_vessel() {
        let cache = SnapshotCache::new();
        cache.ingest(vessels_update(&[(1, "Walla Walla")])).unwrap();

        let found = cache.get_vessel(VesselId(1)).unwrap();
        assert_eq!(found.name, "Walla Walla");
        assert!(cache.get_vessel(VesselId(2)).is_none());
    }

    #[test]
    fn schedule_miss_returns_empty_not_error() {
        let cache = SnapshotCache::new();
        cache
            .ingest(schedule_update(7, 14, vec![slot(100)]))
            .unwrap();

        // Known departing terminal, unknown arriving terminal.
        assert!(cache.get_schedule(TerminalId(7), TerminalId(99)).is_empty());
        // Unknown departing terminal.
        assert!(cache.get_schedule(TerminalId(99), TerminalId(14)).is_empty());
    }

    // ─── Merge semantics ───

    #[test]
    fn ingest_is_idempotent() {
        let cache = SnapshotCache::new();
        let update = vessels_update(&[(1, "Tokitae"), (2, "Suquamish")]);

        cache.ingest(update.clone()).unwrap();
        let after_once = cache.get_vessels();

        cache.ingest(update).unwrap();
        assert_eq!(cache.get_vessels(), after_once);
    }

    #[test]
    fn disjoint_collections_both_survive() {
        let cache = SnapshotCache::new();
        cache.ingest(vessels_update(&[(1, "Tokitae")])).unwrap();
        cache
            .ingest(SnapshotUpdate {
                terminals_by_id: Some(HashMap::from([(TerminalId(7), terminal(7, "Clinton"))])),
                ..Default::default()
            })
            .unwrap();

        // The terminal ingest did not disturb the vessel collection.
        assert!(cache.get_vessel(VesselId(1)).is_some());
        assert!(cache.get_terminal(TerminalId(7)).is_some());
    }

    #[test]
    fn repeated_collection_is_replaced_not_merged() {
        let cache = SnapshotCache::new();
        cache
            .ingest(vessels_update(&[(1, "Tokitae"), (2, "Suquamish")]))
            .unwrap();
        cache.ingest(vessels_update(&[(3, "Kitsap")])).unwrap();

        // Wholesale replacement: vessels absent from the second update are gone.
        assert!(cache.get_vessel(VesselId(1)).is_none());
        assert!(cache.get_vessel(VesselId(2)).is_none());
        assert_eq!(cache.get_vessels().len(), 1);
        assert_eq!(cache.get_vessel(VesselId(3)).unwrap().name, "Kitsap");
    }

    #[test]
    fn rejected_ingest_leaves_cache_unchanged() {
        let cache = SnapshotCache::new();
        cache.ingest(vessels_update(&[(1, "Tokitae")])).unwrap();

        // A mixed update where the vessel collection is fine but the
        // schedule is inconsistent must not apply either collection.
        let bad = SnapshotUpdate {
            vessels_by_id: Some(HashMap::from([(VesselId(9), vessel(9, "Chimacum"))])),
            schedule_by_terminal: Some(HashMap::from([(
                TerminalId(7),
                HashMap::from([(TerminalId(7), Vec::new())]),
            )])),
            ..Default::default()
        };
        assert!(cache.ingest(bad).is_err());

        assert!(cache.get_vessel(VesselId(9)).is_none());
        assert_eq!(cache.get_vessel(VesselId(1)).unwrap().name, "Tokitae");
    }

    // ─── Ordering ───

    #[test]
    fn schedule_sorted_on_read() {
        let cache = SnapshotCache::new();
        cache
            .ingest(schedule_update(7, 14, vec![slot(300), slot(100), slot(200)]))
            .unwrap();

        let slots = cache.get_schedule(TerminalId(7), TerminalId(14));
        let times: Vec<_> = slots.iter().map(|s| s.departure_time).collect();
        assert_eq!(
            times,
            vec![
                DateTime::from_timestamp(100, 0).unwrap(),
                DateTime::from_timestamp(200, 0).unwrap(),
                DateTime::from_timestamp(300, 0).unwrap(),
            ]
        );
    }

    proptest! {
        /// Slots come back sorted ascending by departure time regardless of
        /// the order they were ingested in.
        #[test]
        fn prop_schedule_always_sorted(timestamps in prop::collection::vec(0i64..4_000_000_000, 0..30)) {
            let cache = SnapshotCache::new();
            let slots = timestamps.iter().map(|t| slot(*t)).collect();
            cache.ingest(schedule_update(1, 2, slots)).unwrap();

            let read = cache.get_schedule(TerminalId(1), TerminalId(2));
            prop_assert_eq!(read.len(), timestamps.len());
            for window in read.windows(2) {
                prop_assert!(window[0].departure_time <= window[1].departure_time);
            }
        }

        /// Ingesting twice is indistinguishable from ingesting once.
        #[test]
        fn prop_ingest_idempotent(ids in prop::collection::hash_set(0u32..1000, 0..20)) {
            let cache = SnapshotCache::new();
            let vessels: Vec<(u32, &str)> = ids.iter().map(|id| (*id, "M/V Test")).collect();
            let update = vessels_update(&vessels);

            cache.ingest(update.clone()).unwrap();
            let once = cache.get_vessels();
            cache.ingest(update).unwrap();
            prop_assert_eq!(cache.get_vessels(), once);
        }
    }

    // ─── Sharing ───

    /// The cache is shared by reference between the polling job and readers.
    #[test]
    fn shared_across_threads() {
        use std::sync::Arc;

        let cache = Arc::new(SnapshotCache::new());
        let writer = {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                cache.ingest(vessels_update(&[(1, "Walla Walla")])).unwrap();
            })
        };
        writer.join().unwrap();

        assert_eq!(cache.get_vessel(VesselId(1)).unwrap().name, "Walla Walla");
    }
}
