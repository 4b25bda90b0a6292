//! The notification payload handed to the delivery queue.

use serde::{Deserialize, Serialize};

/// A push notification message, immutable once enqueued.
///
/// The payload schema belongs to the downstream messaging provider; the
/// queue treats it as opaque and only moves it from enqueue to send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    /// The provider registration token identifying the recipient device.
    pub recipient: String,

    /// Provider-defined notification payload, passed through verbatim.
    pub payload: serde_json::Value,
}

impl PushMessage {
    pub fn new(recipient: impl Into<String>, payload: serde_json::Value) -> Self {
        PushMessage {
            recipient: recipient.into(),
            payload,
        }
    }
}
