//! The downstream send capability and its error taxonomy.
//!
//! The queue depends on a send operation but does not define one: production
//! code wraps the messaging provider's SDK, tests use scripted fakes. Errors
//! are categorized for retry decisions:
//!
//! - **Transient** errors (network hiccups, provider 5xx, rate limits) are
//!   retried with backoff.
//! - **Permanent** errors (unregistered device token, malformed payload) are
//!   dropped immediately; retrying them would fail identically.

use std::fmt;
use std::future::Future;
use thiserror::Error;

use super::message::PushMessage;

/// The kind of send failure, categorized for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendErrorKind {
    /// Safe to retry with backoff. The default: a provider that does not
    /// classify its failures gets every error retried, matching the
    /// behavior of treating all rejections alike.
    #[default]
    Transient,

    /// Retrying would fail identically; drop the message without backoff.
    Permanent,
}

impl SendErrorKind {
    /// Returns true if a failure of this kind should be retried.
    pub fn is_retriable(&self) -> bool {
        matches!(self, SendErrorKind::Transient)
    }
}

/// A failure reported by the downstream messaging provider.
#[derive(Debug, Error)]
pub struct SendError {
    /// The kind of error (transient or permanent).
    pub kind: SendErrorKind,

    /// A human-readable description of the failure.
    pub message: String,

    /// The underlying provider error, if available.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SendErrorKind::Transient => write!(f, "transient send failure: {}", self.message),
            SendErrorKind::Permanent => write!(f, "permanent send failure: {}", self.message),
        }
    }
}

impl SendError {
    /// Creates a transient (retriable) error.
    pub fn transient(message: impl Into<String>) -> Self {
        SendError {
            kind: SendErrorKind::Transient,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a permanent (non-retriable) error.
    pub fn permanent(message: impl Into<String>) -> Self {
        SendError {
            kind: SendErrorKind::Permanent,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying provider error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

/// The capability of sending a push message to the downstream provider.
///
/// Exactly one send attempt per call; the queue owns all retry behavior.
///
/// # Example (scripted fake for testing)
///
/// ```ignore
/// struct AlwaysOk;
///
/// impl PushSender for AlwaysOk {
///     async fn send(&self, _message: &PushMessage) -> Result<(), SendError> {
///         Ok(())
///     }
/// }
/// ```
pub trait PushSender {
    /// Attempts to deliver one message, resolving on provider acknowledgement.
    fn send(&self, message: &PushMessage) -> impl Future<Output = Result<(), SendError>> + Send;
}
