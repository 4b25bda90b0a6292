//! Schedule slot records: individual scheduled crossings on a route.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single scheduled ferry departure on a departing/arriving terminal pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Scheduled departure time. Route reads are ordered ascending by this.
    pub departure_time: DateTime<Utc>,

    /// Vehicle space counts for this sailing. Absent when the upstream
    /// capacity feed has no data for the sailing yet.
    #[serde(default)]
    pub capacity: Option<SlotCapacity>,

    /// Whether the sailing has been cancelled.
    #[serde(default)]
    pub cancelled: bool,

    /// Minutes behind schedule as estimated by the upstream feed.
    /// Zero when on time; negative values (early departures) do occur.
    #[serde(default)]
    pub delay_minutes: i64,
}

impl Slot {
    /// Best estimate of the actual departure time: the scheduled time
    /// shifted by the reported delay.
    pub fn estimated_departure(&self) -> DateTime<Utc> {
        self.departure_time + chrono::Duration::minutes(self.delay_minutes)
    }
}

/// Vehicle space counts for a single sailing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotCapacity {
    /// Total vehicle spaces on the sailing.
    pub total_spaces: u32,

    /// Spaces remaining for drive-up traffic.
    pub drive_up_spaces: u32,

    /// Spaces remaining in the reservation pool.
    pub reservable_spaces: u32,
}
