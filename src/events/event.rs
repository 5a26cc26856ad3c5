//! # Runtime events emitted by sort tasks, observers and supervisors.
//!
//! [`EventKind`] classifies runtime events in four groups:
//! - **Sort lifecycle**: a sort task started, finished or failed
//! - **Progress**: an observer crossed a progress threshold
//! - **Completion**: per-algorithm, per-category and global completion
//! - **Runtime**: shutdown, barrier timeout, subscriber problems
//!
//! [`Event`] carries the optional metadata (algorithm, category, percent, count, reason).
//!
//! ## Ordering guarantees
//! Each event has a globally unique, monotonically increasing `seq`.
//!
//! ## Example
//! ```rust
//! use sortvisor::{Category, Event, EventKind};
//!
//! let ev = Event::new(EventKind::ProgressReported)
//!     .with_algorithm("bubble")
//!     .with_category(Category::Swaps)
//!     .with_progress(40, 1234);
//!
//! assert_eq!(ev.kind, EventKind::ProgressReported);
//! assert_eq!(ev.algorithm.as_deref(), Some("bubble"));
//! assert_eq!(ev.percent, Some(40));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::events::Category;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Sort lifecycle ===
    /// Sort task is starting.
    ///
    /// Sets:
    /// - `algorithm`: algorithm name
    SortStarting,

    /// Sort task finished its algorithm.
    ///
    /// Sets:
    /// - `algorithm`: algorithm name
    SortFinished,

    /// Sort task stopped early (cancelled or its stream closed).
    ///
    /// Sets:
    /// - `algorithm`: algorithm name
    /// - `reason`: error message
    SortFailed,

    // === Progress ===
    /// Observer crossed a progress threshold.
    ///
    /// Sets:
    /// - `algorithm`: algorithm name
    /// - `category`: comparisons or swaps
    /// - `percent`: threshold crossed (0..=100)
    /// - `count`: events of this category seen so far
    ProgressReported,

    /// Observer's queue closed without an end-of-stream marker.
    ///
    /// Sets:
    /// - `algorithm`: algorithm name
    /// - `category`: comparisons or swaps
    /// - `count`: events seen before the queue closed
    StreamClosed,

    /// Observer could not hand `Completed` to its category supervisor.
    ///
    /// Sets:
    /// - `algorithm`: algorithm name
    /// - `category`: comparisons or swaps
    SupervisorUnreachable,

    // === Completion ===
    /// Observer reported an algorithm done to its category supervisor.
    ///
    /// Sets:
    /// - `algorithm`: algorithm name
    /// - `category`: comparisons or swaps
    /// - `count`: total events of this category
    AlgorithmCompleted,

    /// Every registered algorithm is done in one category.
    ///
    /// Sets:
    /// - `category`: comparisons or swaps
    CategoryCompleted,

    /// Both categories are complete; terminal for the subscriber listener.
    AllCompleted,

    // === Runtime ===
    /// Shutdown requested (OS signal observed).
    ShutdownRequested,

    /// Barrier wait exceeded the configured timeout.
    ///
    /// Sets:
    /// - `reason`: pending categories
    BarrierTimeout,

    /// Run ended without completing; terminal for the subscriber listener.
    ///
    /// Sets:
    /// - `reason`: error label
    RunAborted,

    /// Subscriber dropped an event (queue full or worker closed), or the subscriber
    /// listener fell behind the bus and skipped lifecycle events.
    ///
    /// Sets:
    /// - `reason`: subscriber and cause
    SubscriberOverflow,

    /// Subscriber panicked while handling an event.
    ///
    /// Sets:
    /// - `reason`: subscriber and panic message
    SubscriberPanicked,
}

/// Runtime event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Algorithm name, if applicable.
    pub algorithm: Option<Arc<str>>,
    /// Event category, if applicable.
    pub category: Option<Category>,
    /// Progress threshold in percent.
    pub percent: Option<u32>,
    /// Number of events seen.
    pub count: Option<u64>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            algorithm: None,
            category: None,
            percent: None,
            count: None,
            reason: None,
        }
    }

    /// Attaches an algorithm name.
    #[inline]
    pub fn with_algorithm(mut self, algorithm: impl Into<Arc<str>>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    /// Attaches a category.
    #[inline]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Attaches a progress percent and event count.
    #[inline]
    pub fn with_progress(mut self, percent: u32, count: u64) -> Self {
        self.percent = Some(percent);
        self.count = Some(count);
        self
    }

    /// Attaches an event count.
    #[inline]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_reason(format!("subscriber={subscriber} info={info}"))
    }

    /// True for events that end a run's event flow.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, EventKind::AllCompleted | EventKind::RunAborted)
    }
}
