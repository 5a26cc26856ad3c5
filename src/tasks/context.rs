//! # Sort task context: private dataset plus emission contract.
//!
//! [`SortContext`] is the only way a [`Sorter`](crate::Sorter) reaches its data.
//!
//! ## Rules
//! - Every comparison emits one [`ComparisonEvent`] **before** the result is used.
//! - Every exchange emits one [`SwapEvent`] carrying the **pre-exchange** values, then
//!   exchanges. Exchanging an element with itself is not an exchange and emits nothing.
//! - Every event carries the current known-sorted count, which never decreases.
//! - [`SortContext::finish`] emits `EndOfStream` on comparisons, then on swaps, once;
//!   nothing is emitted afterwards.
//! - Emission waits on a full queue and aborts with [`TaskError::Canceled`] as soon as
//!   the cancellation token fires.

use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::events::{ComparisonEvent, EventSender, StreamEvent, StreamItem, SwapEvent};

/// Private dataset of one sort task and the producer ends of its two queues.
#[derive(Debug)]
pub struct SortContext {
    data: Vec<i32>,
    known_sorted: usize,
    comparisons: EventSender<ComparisonEvent>,
    swaps: EventSender<SwapEvent>,
    token: CancellationToken,
    finished: bool,
}

impl SortContext {
    /// Creates a context owning `data`.
    pub fn new(
        data: Vec<i32>,
        comparisons: EventSender<ComparisonEvent>,
        swaps: EventSender<SwapEvent>,
        token: CancellationToken,
    ) -> Self {
        Self {
            data,
            known_sorted: 0,
            comparisons,
            swaps,
            token,
            finished: false,
        }
    }

    /// Number of elements in the dataset.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only view of the dataset.
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// Elements currently guaranteed to be in final position.
    pub fn known_sorted(&self) -> usize {
        self.known_sorted
    }

    /// True once [`finish`](Self::finish) has run.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consumes the context and returns the dataset.
    pub fn into_data(self) -> Vec<i32> {
        self.data
    }

    /// Compares `data[i]` with `data[j]`, emits the comparison, returns `data[i] < data[j]`.
    pub async fn compare(&mut self, i: usize, j: usize) -> Result<bool, TaskError> {
        let values = (self.data[i], self.data[j]);
        let ev = ComparisonEvent {
            indices: (i, j),
            values,
            first_was_lower: values.0 < values.1,
            known_sorted: self.known_sorted,
        };
        emit(&self.token, &self.comparisons, StreamItem::Data(ev)).await?;
        Ok(ev.first_was_lower)
    }

    /// Emits the exchange of `data[i]` and `data[j]`, then performs it.
    pub async fn swap(&mut self, i: usize, j: usize) -> Result<(), TaskError> {
        if i == j {
            return Ok(());
        }
        let ev = SwapEvent {
            indices: (i, j),
            values: (self.data[i], self.data[j]),
            known_sorted: self.known_sorted,
        };
        emit(&self.token, &self.swaps, StreamItem::Data(ev)).await?;
        self.data.swap(i, j);
        Ok(())
    }

    /// Raises the known-sorted count to `count` (clamped to the dataset length).
    pub fn mark_sorted(&mut self, count: usize) {
        debug_assert!(
            count >= self.known_sorted,
            "known-sorted count must not decrease ({} -> {count})",
            self.known_sorted
        );
        self.known_sorted = self.known_sorted.max(count.min(self.data.len()));
    }

    /// Adds `by` to the known-sorted count.
    pub fn advance_sorted(&mut self, by: usize) {
        self.mark_sorted(self.known_sorted + by);
    }

    /// Ends both streams. Later calls do nothing.
    ///
    /// Both markers are attempted even if the first fails; the first error is returned.
    pub async fn finish(&mut self) -> Result<(), TaskError> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        let comparisons = emit(&self.token, &self.comparisons, StreamItem::EndOfStream).await;
        let swaps = emit(&self.token, &self.swaps, StreamItem::EndOfStream).await;
        comparisons.and(swaps)
    }
}

async fn emit<E: StreamEvent>(
    token: &CancellationToken,
    tx: &EventSender<E>,
    item: StreamItem<E>,
) -> Result<(), TaskError> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(TaskError::Canceled),
        res = tx.send(item) => res,
    }
}
