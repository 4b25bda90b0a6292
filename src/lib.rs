//! Ferry Tracker core - snapshot cache and push delivery for a ferry-schedule server.
//!
//! This library provides the two long-lived subsystems shared by the server
//! process: the in-memory snapshot cache of upstream schedule data, and the
//! at-least-once push notification delivery queue.

pub mod cache;
pub mod push;
pub mod types;
