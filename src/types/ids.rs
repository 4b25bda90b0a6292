//! Newtype wrappers for domain identifiers.
//!
//! These types prevent accidental mixing of different ID types (e.g., using a
//! VesselId where a TerminalId is expected) and make the code more
//! self-documenting. Both wrap the numeric identifiers assigned by the
//! upstream WSF API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A ferry terminal identifier assigned by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerminalId(pub u32);

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "terminal-{}", self.0)
    }
}

impl From<u32> for TerminalId {
    fn from(n: u32) -> Self {
        TerminalId(n)
    }
}

/// A vessel identifier assigned by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VesselId(pub u32);

impl fmt::Display for VesselId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vessel-{}", self.0)
    }
}

impl From<u32> for VesselId {
    fn from(n: u32) -> Self {
        VesselId(n)
    }
}
