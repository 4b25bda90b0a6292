//! Core domain types for the ferry tracker.
//!
//! These types model the three upstream entity collections fetched from the
//! Washington State Ferries API: terminals, vessels, and per-route schedules.

mod ids;
mod schedule;
mod terminal;
mod vessel;

pub use ids::{TerminalId, VesselId};
pub use schedule::{Slot, SlotCapacity};
pub use terminal::{Bulletin, Terminal, TerminalCapabilities};
pub use vessel::{Vessel, VesselPosition};
