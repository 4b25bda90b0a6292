//! Process-wide snapshot cache of upstream schedule data.
//!
//! A periodic polling job fetches fresh terminal, vessel, and schedule data
//! from the upstream API and merges it into the cache; request handlers read
//! from it synchronously to build responses. The cache holds whatever the
//! last successful ingest produced: there is no per-key versioning and no
//! staleness bound, because freshness is the polling job's responsibility.
//!
//! # Module Structure
//!
//! - [`update`]: the partial-update type handed to ingest, and its validation
//! - [`snapshot`]: the cache service object itself

mod snapshot;
mod update;

pub use snapshot::SnapshotCache;
pub use update::{IngestError, SnapshotUpdate};
