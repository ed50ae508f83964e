//! Realtime notifier seam
//!
//! The core publishes change events here; delivery, reconnects and room
//! membership belong to the presentation layer. Publishing is
//! fire-and-log: a failed broadcast never fails the mutating request.

use shared::event::{ChangeEvent, Scope};
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 4096;

/// A change event together with its subscriber-filtering scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub scope: Scope,
    pub event: ChangeEvent,
}

/// Publish seam consumed by the lifecycle manager.
pub trait Notifier: Send + Sync {
    fn publish(&self, scope: Scope, event: ChangeEvent);
}

/// Broadcast-channel notifier; subscribers filter by scope.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<Published>,
}

impl BroadcastNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to every published event.
    pub fn subscribe(&self) -> broadcast::Receiver<Published> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for BroadcastNotifier {
    fn publish(&self, scope: Scope, event: ChangeEvent) {
        if self.tx.send(Published { scope, event }).is_err() {
            tracing::debug!(channel = %scope.channel(), "Event broadcast dropped: no active receivers");
        }
    }
}
