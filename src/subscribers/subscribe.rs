//! # Core subscriber trait
//!
//! Each subscriber is driven by a dedicated worker loop fed by a bounded queue owned
//! by the [`SubscriberSet`](crate::SubscriberSet).
//!
//! ## Contract
//! - Implementations may be slow; they do **not** block observers or supervisors.
//! - Each subscriber declares its queue capacity via [`Subscribe::queue_capacity`].
//!   If the queue overflows, events for that subscriber are **dropped**.
//!
//! ## Example
//! ```rust
//! use sortvisor::{Event, EventKind, Subscribe};
//!
//! struct Finished;
//!
//! #[async_trait::async_trait]
//! impl Subscribe for Finished {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::SortFinished {
//!             // record the finish...
//!         }
//!     }
//!     fn name(&self) -> &'static str { "finished" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Contract for runtime event subscribers.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for overflow/panic reports).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this subscriber's queue.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
