//! # Run one sort task.
//!
//! Executes a [`Sorter`](crate::Sorter) over its [`SortContext`] and publishes lifecycle
//! events to the [`Bus`].
//!
//! ## Event flow
//!
//! ```text
//! Success:
//!   publish SortStarting → sorter.sort() → Ok → ctx.finish() → publish SortFinished
//!
//! Stream closed:
//!   publish SortStarting → sorter.sort() → Err(StreamClosed) → ctx.finish() → publish SortFailed
//!
//! Cancellation:
//!   publish SortStarting → sorter.sort() → Err(Canceled) → publish SortFailed
//!                          (no end markers; observers see their queues close)
//! ```
//!
//! ## Rules
//! - Always publishes **exactly one** terminal event: `SortFinished` or `SortFailed`
//! - The end-of-stream pair is attempted on every exit path except cancellation
//! - The dataset is handed back in [`SortOutcome`] once the task is done with it

use crate::{
    error::TaskError,
    events::{Bus, Event, EventKind},
    tasks::{AlgorithmId, SortContext, SorterRef},
};

/// Result of one sort task.
#[derive(Debug)]
pub struct SortOutcome {
    /// Registration id of the algorithm.
    pub id: AlgorithmId,
    /// Algorithm name.
    pub name: String,
    /// The task's dataset after sorting (or at the point it stopped).
    pub data: Vec<i32>,
    /// How the task ended.
    pub result: Result<(), TaskError>,
}

impl SortOutcome {
    /// True if the sorter ran to completion and both streams were ended.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs `sorter` over `ctx`, publishing lifecycle events to `bus`.
pub async fn run_sort(
    id: AlgorithmId,
    sorter: SorterRef,
    mut ctx: SortContext,
    bus: Bus,
) -> SortOutcome {
    let name = sorter.name().to_string();
    bus.publish(Event::new(EventKind::SortStarting).with_algorithm(name.as_str()));

    let mut result = sorter.sort(&mut ctx).await;
    if !matches!(result, Err(TaskError::Canceled)) {
        let ended = ctx.finish().await;
        result = result.and(ended);
    }

    match &result {
        Ok(()) => publish_finished(&bus, &name),
        Err(e) => publish_failed(&bus, &name, e),
    }

    SortOutcome {
        id,
        name,
        data: ctx.into_data(),
        result,
    }
}

/// Publishes `SortFinished`.
fn publish_finished(bus: &Bus, name: &str) {
    bus.publish(Event::new(EventKind::SortFinished).with_algorithm(name));
}

/// Publishes `SortFailed` with error details.
fn publish_failed(bus: &Bus, name: &str, err: &TaskError) {
    bus.publish(
        Event::new(EventKind::SortFailed)
            .with_algorithm(name)
            .with_reason(err.to_string()),
    );
}
