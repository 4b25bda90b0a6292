//! The FIFO push queue and its drain loop.
//!
//! `enqueue` appends to the tail and, when no drain loop is running, spawns
//! one. The loop sends messages from the head one at a time: a transient
//! failure keeps the current message at the head (it is retried, after its
//! backoff, before anything enqueued later), a permanent failure or an
//! exhausted backoff drops it, and an empty queue ends the loop.
//!
//! # Single drain loop
//!
//! At most one drain loop runs at a time. The `draining` flag lives under
//! the same mutex as the queue: `enqueue` spawns a loop only on a
//! false-to-true transition, and the loop clears the flag in the same lock
//! acquisition that observes the queue empty. Two loops can therefore never
//! both own the head, even when enqueues race a loop that is backing off.
//!
//! # Completion semantics
//!
//! The receipt returned by `enqueue` resolves with the outcome of that
//! specific message, not with the queue reaching empty. Callers that do not
//! care may drop the receipt; delivery proceeds regardless.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::message::PushMessage;
use super::retry::{RetryConfig, RetryState};
use super::sender::PushSender;

/// The terminal fate of an enqueued message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The provider acknowledged the send.
    Delivered,

    /// The message was discarded: either its backoff exceeded the ceiling
    /// or the provider reported a permanent failure.
    Dropped,
}

/// Resolves with the [`DeliveryOutcome`] of one enqueued message.
///
/// Dropping the receipt detaches the caller from the outcome without
/// affecting delivery.
#[derive(Debug)]
pub struct DeliveryReceipt {
    rx: oneshot::Receiver<DeliveryOutcome>,
}

impl DeliveryReceipt {
    /// Waits for the message to be delivered or dropped.
    pub async fn outcome(self) -> DeliveryOutcome {
        // The sender half is only dropped without resolving if the drain
        // task panicked; report that as a drop.
        self.rx.await.unwrap_or(DeliveryOutcome::Dropped)
    }
}

/// A message waiting in the queue, with its own retry bookkeeping.
#[derive(Debug)]
struct QueuedPush {
    message: PushMessage,
    retry: RetryState,
    receipt_tx: oneshot::Sender<DeliveryOutcome>,
}

#[derive(Debug)]
struct QueueState {
    pending: VecDeque<QueuedPush>,
    draining: bool,
}

#[derive(Debug)]
struct Inner<S> {
    sender: S,
    config: RetryConfig,
    state: Mutex<QueueState>,
}

/// FIFO queue delivering push messages through a [`PushSender`], with
/// per-message exponential backoff on transient failures.
///
/// Cheap to clone; clones share the same queue and drain loop.
#[derive(Debug)]
pub struct PushQueue<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for PushQueue<S> {
    fn clone(&self) -> Self {
        PushQueue {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> PushQueue<S>
where
    S: PushSender + Send + Sync + 'static,
{
    /// Creates a queue with the default backoff configuration.
    pub fn new(sender: S) -> Self {
        Self::with_config(sender, RetryConfig::DEFAULT)
    }

    /// Creates a queue with a custom backoff configuration.
    pub fn with_config(sender: S, config: RetryConfig) -> Self {
        PushQueue {
            inner: Arc::new(Inner {
                sender,
                config,
                state: Mutex::new(QueueState {
                    pending: VecDeque::new(),
                    draining: false,
                }),
            }),
        }
    }

    /// Appends a message to the tail of the queue.
    ///
    /// Spawns the drain loop if none is running, so enqueuing onto an idle
    /// queue starts delivery immediately. Must be called from within a
    /// tokio runtime.
    pub fn enqueue(&self, message: PushMessage) -> DeliveryReceipt {
        let (receipt_tx, rx) = oneshot::channel();

        let start_drain = {
            let mut state = lock(&self.inner.state);
            state.pending.push_back(QueuedPush {
                message,
                retry: RetryState::new(&self.inner.config),
                receipt_tx,
            });
            // Only the false-to-true transition spawns; an active loop
            // (even one parked in backoff) will pick the message up.
            if state.draining {
                false
            } else {
                state.draining = true;
                true
            }
        };

        if start_drain {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(drain(inner));
        }

        DeliveryReceipt { rx }
    }

    /// Number of messages waiting in the queue. Does not count a message
    /// currently owned by the drain loop.
    pub fn len(&self) -> usize {
        lock(&self.inner.state).pending.len()
    }

    /// Returns true if no messages are waiting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The single active drain loop: owns the queue head until the queue is
/// observed empty.
async fn drain<S: PushSender>(inner: Arc<Inner<S>>) {
    debug!("push drain loop started");

    loop {
        let next = {
            let mut state = lock(&inner.state);
            let item = state.pending.pop_front();
            if item.is_none() {
                // Clearing the flag under the same lock that observed the
                // empty queue is what keeps a racing enqueue from either
                // stranding its message or spawning a second loop.
                state.draining = false;
            }
            item
        };
        let Some(item) = next else { break };

        deliver(&inner, item).await;
    }

    debug!("push drain loop idle");
}

/// Sends one message until it is delivered or dropped.
async fn deliver<S: PushSender>(inner: &Arc<Inner<S>>, mut item: QueuedPush) {
    loop {
        let result = inner.sender.send(&item.message).await;
        match result {
            Ok(()) => {
                let _ = item.receipt_tx.send(DeliveryOutcome::Delivered);
                return;
            }
            Err(err) if !err.kind.is_retriable() => {
                warn!(
                    recipient = %item.message.recipient,
                    attempts = item.retry.attempts() + 1,
                    error = %err,
                    "dropping push after permanent send failure"
                );
                let _ = item.receipt_tx.send(DeliveryOutcome::Dropped);
                return;
            }
            Err(err) => match item.retry.record_failure(&inner.config) {
                Some(delay) => {
                    warn!(
                        recipient = %item.message.recipient,
                        attempt = item.retry.attempts(),
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "push send failed, retrying after backoff"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    warn!(
                        recipient = %item.message.recipient,
                        attempts = item.retry.attempts(),
                        error = %err,
                        "dropping push after exhausting retries"
                    );
                    let _ = item.receipt_tx.send(DeliveryOutcome::Dropped);
                    return;
                }
            },
        }
    }
}

fn lock(state: &Mutex<QueueState>) -> MutexGuard<'_, QueueState> {
    // Queue state cannot be left torn: every mutation under this lock is a
    // single push, pop, or flag flip.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
