//! At-least-once push notification delivery.
//!
//! Any part of the server that needs to notify a user enqueues a
//! [`PushMessage`]; a single background drain loop sends messages to the
//! downstream provider in FIFO order, retrying transient failures with
//! per-message exponential backoff and dropping a message once its backoff
//! would exceed the ceiling. Delivery is best-effort: a failure never
//! propagates past `enqueue`, it only surfaces through the caller's
//! [`DeliveryReceipt`] and warn-level logs.
//!
//! # Module Structure
//!
//! - [`message`]: the opaque notification payload
//! - [`sender`]: the provider capability trait and its error taxonomy
//! - [`retry`]: backoff configuration and per-message retry state
//! - [`queue`]: the FIFO queue and its single guarded drain loop

mod message;
mod queue;
mod retry;
mod sender;

pub use message::PushMessage;
pub use queue::{DeliveryOutcome, DeliveryReceipt, PushQueue};
pub use retry::{RetryConfig, RetryState};
pub use sender::{PushSender, SendError, SendErrorKind};
