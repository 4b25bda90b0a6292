//! Terminal records as ingested from the upstream terminals feed.

use serde::{Deserialize, Serialize};

use super::ids::TerminalId;

/// A ferry terminal: a dock that routes depart from and arrive at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Terminal {
    pub id: TerminalId,

    /// Human-readable terminal name, e.g. "Clinton" or "Mukilteo".
    pub name: String,

    /// Facilities available at this terminal.
    #[serde(default)]
    pub capabilities: TerminalCapabilities,

    /// Rider-facing notices currently posted for this terminal.
    #[serde(default)]
    pub bulletins: Vec<Bulletin>,

    /// Terminals reachable by a direct sailing from this one.
    #[serde(default)]
    pub mates: Vec<TerminalId>,
}

/// Facilities available at a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TerminalCapabilities {
    pub has_elevator: bool,
    pub has_overhead_loading: bool,
    pub has_restroom: bool,
    pub has_food: bool,
}

/// A rider-facing notice posted for a terminal (service disruptions,
/// schedule changes, and the like).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bulletin {
    pub title: String,

    /// Body text. The upstream feed delivers HTML; it is stored verbatim
    /// and sanitized by the presentation layer.
    pub body: String,

    /// When the bulletin was posted.
    pub published_at: chrono::DateTime<chrono::Utc>,
}
