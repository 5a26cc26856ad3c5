//! # Event observer: one per (algorithm, category).
//!
//! Drains one sort event queue in emission order, turns known-sorted counts into
//! progress reports, and tells its [`CategorySupervisor`](super::category) when the
//! algorithm is done.
//!
//! Reports go to the subscriber listener over a bounded report lane, not the lossy bus:
//! when the listener falls behind, the observer waits instead of dropping a line.
//!
//! ```text
//! loop recv():
//!   ├─ Data(ev)     ─► seen += 1, report every threshold with known*100 >= t*size
//!   ├─ EndOfStream  ─► report every remaining threshold (proportion = 100%)
//!   │                  publish AlgorithmCompleted{count = seen}, stop
//!   └─ closed       ─► publish StreamClosed{count = seen}, stop
//! then: send Completed{id} to the category supervisor
//!       (inbox gone ─► publish SupervisorUnreachable)
//! ```
//!
//! Thresholds are whole percents (`0, step, 2*step, ...` up to 100), so a single event
//! that jumps progress reports every threshold it passed, in order.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::category::SupervisorMessage;
use crate::events::{Event, EventKind, EventReceiver, StreamEvent, StreamItem};
use crate::tasks::AlgorithmId;

/// Threshold bookkeeping for one stream.
#[derive(Debug, Clone)]
pub(crate) struct Progress {
    size: usize,
    step: u32,
    next: u32,
}

impl Progress {
    pub(crate) fn new(size: usize, step: u32) -> Self {
        Self {
            size,
            step: step.clamp(1, 100),
            next: 0,
        }
    }

    /// Thresholds crossed by reaching `known` elements; `None` means the stream ended.
    pub(crate) fn advance(&mut self, known: Option<usize>) -> Vec<u32> {
        let mut crossed = Vec::new();
        while self.next <= 100 && self.reached(known, self.next) {
            crossed.push(self.next);
            self.next += self.step;
        }
        crossed
    }

    fn reached(&self, known: Option<usize>, threshold: u32) -> bool {
        match known {
            None => true,
            Some(known) => {
                known.saturating_mul(100) >= (threshold as usize).saturating_mul(self.size)
            }
        }
    }
}

/// Consumer of one sort event queue.
pub(crate) struct Observer<E> {
    id: AlgorithmId,
    algorithm: Arc<str>,
    stream: EventReceiver<E>,
    progress: Progress,
    supervisor: mpsc::Sender<SupervisorMessage>,
    reports: mpsc::Sender<Event>,
}

impl<E: StreamEvent> Observer<E> {
    pub(crate) fn new(
        id: AlgorithmId,
        algorithm: Arc<str>,
        stream: EventReceiver<E>,
        progress: Progress,
        supervisor: mpsc::Sender<SupervisorMessage>,
        reports: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            id,
            algorithm,
            stream,
            progress,
            supervisor,
            reports,
        }
    }

    /// Runs until the end-of-stream marker or until the queue closes.
    ///
    /// Returns the number of data events seen. Completion is reported to the category
    /// supervisor on both paths so the barrier is never starved.
    pub(crate) async fn run(mut self) -> u64 {
        let mut seen: u64 = 0;
        loop {
            match self.stream.recv().await {
                Some(StreamItem::Data(ev)) => {
                    seen += 1;
                    self.report(Some(ev.known_sorted()), seen).await;
                }
                Some(StreamItem::EndOfStream) => {
                    self.report(None, seen).await;
                    self.publish(self.event(EventKind::AlgorithmCompleted).with_count(seen))
                        .await;
                    break;
                }
                None => {
                    self.publish(self.event(EventKind::StreamClosed).with_count(seen))
                        .await;
                    break;
                }
            }
        }

        let done = SupervisorMessage::Completed { id: self.id };
        if self.supervisor.send(done).await.is_err() {
            self.publish(self.event(EventKind::SupervisorUnreachable)).await;
        }
        seen
    }

    async fn report(&mut self, known: Option<usize>, seen: u64) {
        for percent in self.progress.advance(known) {
            self.publish(self.event(EventKind::ProgressReported).with_progress(percent, seen))
                .await;
        }
    }

    fn event(&self, kind: EventKind) -> Event {
        Event::new(kind)
            .with_algorithm(Arc::clone(&self.algorithm))
            .with_category(E::CATEGORY)
    }

    /// Waits for room on the report lane.
    ///
    /// The listener keeps draining the lane until the run's terminal event, and that
    /// event is published only after every observer has returned or been aborted.
    async fn publish(&self, ev: Event) {
        let _ = self.reports.send(ev).await;
    }
}
