//! # Per-algorithm sort event streams.
//!
//! Every sort task owns two queues: one for comparisons, one for swaps. A queue is a
//! bounded [`tokio::sync::mpsc`] channel with exactly one producer (the sort task) and
//! one consumer (an observer).
//!
//! ## Rules
//! - **Ordered**: the observer sees items in exactly the order the task emitted them.
//! - **Bounded**: the producer suspends on a full queue, the consumer on an empty one.
//! - **Tagged end**: the end of a stream is [`StreamItem::EndOfStream`], never a
//!   reserved field value, so real data can never be mistaken for the end.
//!
//! ```text
//! SortContext::compare ──► [comparisons queue] ──► Observer<ComparisonEvent>
//! SortContext::swap    ──► [swaps queue]       ──► Observer<SwapEvent>
//! SortContext::finish  ──► EndOfStream on both, then nothing
//! ```

use std::fmt;

use tokio::sync::mpsc;

use crate::error::TaskError;

/// Event category; each has its own supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Element comparisons.
    Comparisons,
    /// Element exchanges.
    Swaps,
}

impl Category {
    /// Both categories, in reporting order.
    pub const ALL: [Category; 2] = [Category::Comparisons, Category::Swaps];

    /// Plural noun used in progress lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Comparisons => "comparisons",
            Category::Swaps => "swaps",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One "is element `i` before element `j`" decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonEvent {
    /// Indices of the compared elements.
    pub indices: (usize, usize),
    /// Values at those indices when compared.
    pub values: (i32, i32),
    /// `values.0 < values.1`.
    pub first_was_lower: bool,
    /// Elements the algorithm guarantees are in final position.
    pub known_sorted: usize,
}

/// One exchange of two elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapEvent {
    /// Indices of the exchanged elements.
    pub indices: (usize, usize),
    /// Values at those indices **before** the exchange.
    pub values: (i32, i32),
    /// Elements the algorithm guarantees are in final position.
    pub known_sorted: usize,
}

/// Common view over sort events used by observers.
pub trait StreamEvent: Send + fmt::Debug + 'static {
    /// Category this event kind belongs to.
    const CATEGORY: Category;

    /// Known-sorted count carried by the event.
    fn known_sorted(&self) -> usize;
}

impl StreamEvent for ComparisonEvent {
    const CATEGORY: Category = Category::Comparisons;

    fn known_sorted(&self) -> usize {
        self.known_sorted
    }
}

impl StreamEvent for SwapEvent {
    const CATEGORY: Category = Category::Swaps;

    fn known_sorted(&self) -> usize {
        self.known_sorted
    }
}

/// Item carried on a sort event queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamItem<E> {
    /// A real comparison or swap.
    Data(E),
    /// The algorithm has finished; nothing follows.
    EndOfStream,
}

/// Creates a bounded sort event queue. Capacity is clamped to at least 1.
pub fn channel<E: StreamEvent>(capacity: usize) -> (EventSender<E>, EventReceiver<E>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (EventSender { tx }, EventReceiver { rx })
}

/// Producer half of a sort event queue.
#[derive(Debug)]
pub struct EventSender<E> {
    tx: mpsc::Sender<StreamItem<E>>,
}

impl<E: StreamEvent> EventSender<E> {
    /// Sends one item, suspending while the queue is full.
    ///
    /// Fails with [`TaskError::StreamClosed`] if the observer is gone.
    pub async fn send(&self, item: StreamItem<E>) -> Result<(), TaskError> {
        self.tx
            .send(item)
            .await
            .map_err(|_| TaskError::StreamClosed {
                category: E::CATEGORY,
            })
    }
}

/// Consumer half of a sort event queue.
#[derive(Debug)]
pub struct EventReceiver<E> {
    rx: mpsc::Receiver<StreamItem<E>>,
}

impl<E: StreamEvent> EventReceiver<E> {
    /// Receives the next item; `None` once the producer is dropped and the queue drained.
    pub async fn recv(&mut self) -> Option<StreamItem<E>> {
        self.rx.recv().await
    }
}
