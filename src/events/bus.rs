//! # Runtime event bus.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] used for lifecycle events
//! (sort start and finish, category completion, failures). It is **not** used for sort
//! events, which travel on per-algorithm queues (see [`channel`](crate::events::channel)),
//! nor for observer reports, which must not be skipped and go over a bounded lane
//! straight to the subscriber listener.
//!
//! ## Architecture
//! ```text
//! Publishers (many):                    Subscriber (one per run):
//!   runner      ──┐
//!   categories  ──┼──────► Bus ───────► subscriber listener ────► SubscriberSet
//!   supervisor  ──┘  (broadcast chan)     (in Supervisor::run)
//!                                                ▲
//!   observers ───────── report lane (mpsc) ──────┘
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never waits.
//! - **Bounded capacity**: one ring buffer shared by all receivers.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: events are lost if nobody is subscribed at send time.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for runtime events.
///
/// Cheap to clone; every clone publishes into the same ring buffer.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given capacity (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all current receivers. Dropped if there are none.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a receiver that observes events sent after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
