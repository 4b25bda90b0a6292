//! Vessel records as ingested from the upstream vessel-watch feed.

use serde::{Deserialize, Serialize};

use super::ids::VesselId;

/// A ferry vessel with its last reported position and dock status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vessel {
    pub id: VesselId,

    /// Vessel name, e.g. "Walla Walla".
    pub name: String,

    /// Last reported position. Absent while the vessel's AIS transponder
    /// is silent (typically when out of service).
    #[serde(default)]
    pub position: Option<VesselPosition>,

    /// Compass heading in degrees, when reported.
    #[serde(default)]
    pub heading: Option<u16>,

    /// Speed over ground in knots, when reported.
    #[serde(default)]
    pub speed: Option<f64>,

    /// Whether the vessel is currently tied up at a dock.
    #[serde(default)]
    pub at_dock: bool,
}

/// A vessel's reported geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselPosition {
    pub latitude: f64,
    pub longitude: f64,
}
