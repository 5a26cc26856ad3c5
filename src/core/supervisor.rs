//! # Supervisor: wires sort tasks, observers and category supervisors for one run.
//!
//! The [`Supervisor`] owns the event bus, the subscribers and the runtime configuration.
//! Each call to [`Supervisor::run`] builds a fresh topology, waits on the double barrier
//! and hands back every algorithm's dataset.
//!
//! ## High-level architecture
//! ```text
//! run(dataset, sorters):
//!   subscriber_listener(): Bus.subscribe() ─┬─► SubscriberSet::emit(&Event)
//!                          report lane    ─┘
//!   CategorySupervisor(comparisons) ──┐
//!   CategorySupervisor(swaps)       ──┴──► conduit ──► Barrier
//!
//!   for each sorter (id = 1, 2, ...):
//!       Started{id} ─► both category supervisors      (before anything runs)
//!
//!   for each sorter:
//!       run_sort(ctx) ──[comparisons queue]──► Observer ──Completed{id}──► comparisons sup
//!                     └─[swaps queue]───────► Observer ──Completed{id}──► swaps sup
//!       observers ──ProgressReported, AlgorithmCompleted, ...──► report lane (bounded)
//!
//! Completion path:
//!   Barrier opens ─► join sort tasks (registration order)
//!                 ├─ all joined  ─► publish AllCompleted ─► drain subscribers ─► Ok(outcomes)
//!                 └─ a panic     ─► publish RunAborted   ─► drain subscribers ─► TaskPanicked
//!
//! Shutdown path:
//!   shutdown signal ─► publish ShutdownRequested
//!                   ─► runtime_token.cancel()   → child tokens of every sort task
//!                   ─► wait up to cfg.grace, abort the rest
//!                   ─► publish RunAborted ─► Canceled{stuck}
//! ```
//!
//! ## Rules
//! - Every `Started{id}` is delivered before any observer can send `Completed{id}`.
//! - Every progress line of a run is delivered to subscribers before `run` returns.
//!   Observer events travel on a bounded report lane, so a slow listener makes
//!   observers wait; the lane is drained before the terminal event is forwarded.
//! - Lifecycle events travel on the bus. A listener that lags behind it forwards a
//!   `SubscriberOverflow` event with the number of skipped events.
//! - One run at a time: a second concurrent `run` on the same supervisor would share
//!   the bus and see the other run's events.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use sortvisor::{Config, ProgressRecorder, Subscribe, Supervisor, sorters};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), sortvisor::RuntimeError> {
//!     let progress = Arc::new(ProgressRecorder::new());
//!     let sup = Supervisor::builder(Config::default())
//!         .with_subscribers(vec![progress.clone() as Arc<dyn Subscribe>])
//!         .build();
//!
//!     let outcomes = sup.run(&[4, 2, 3, 1], sorters::all()).await?;
//!     assert!(outcomes.iter().all(|o| o.data == vec![1, 2, 3, 4]));
//!     assert!(!progress.records().is_empty());
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{broadcast::error::RecvError, mpsc};
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

use super::{
    barrier::Barrier,
    builder::SupervisorBuilder,
    category::{CategorySupervisor, SupervisorMessage},
    config::Config,
    observer::{Observer, Progress},
    runner::{SortOutcome, run_sort},
    shutdown,
};
use crate::{
    error::RuntimeError,
    events::{Bus, Category, ComparisonEvent, Event, EventKind, SwapEvent, channel},
    subscribers::{Subscribe, SubscriberSet},
    tasks::{AlgorithmId, SortContext, SorterRef},
};

/// A spawned sort task and the name it is reported under.
type SortHandle = (String, JoinHandle<SortOutcome>);

/// Inboxes of the two category supervisors, plus the listener's report lane.
struct Lanes {
    comparisons: mpsc::Sender<SupervisorMessage>,
    swaps: mpsc::Sender<SupervisorMessage>,
    reports: mpsc::Sender<Event>,
}

impl Lanes {
    /// Sends `Started{id}` to both category supervisors.
    ///
    /// Registration happens before any observer exists. A supervisor exits only after
    /// its inbox closes or every started id completes, so neither inbox is closed yet.
    async fn register(&self, id: AlgorithmId) {
        let started = SupervisorMessage::Started { id };
        let _ = self.comparisons.send(started).await;
        let _ = self.swaps.send(started).await;
    }
}

/// Coordinates one sorting race: tasks, observers, supervision and event delivery.
pub struct Supervisor {
    cfg: Config,
    bus: Bus,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl Supervisor {
    /// Creates a supervisor with the given config and subscribers.
    pub fn new(cfg: Config, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        Self {
            cfg,
            bus,
            subscribers,
        }
    }

    /// Returns a builder for a supervisor.
    pub fn builder(cfg: Config) -> SupervisorBuilder {
        SupervisorBuilder::new(cfg)
    }

    /// Runtime configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Races `sorters` over copies of `dataset` until both categories complete or an OS
    /// termination signal arrives.
    ///
    /// Outcomes are returned in the order the sorters were given.
    pub async fn run(
        &self,
        dataset: &[i32],
        sorters: Vec<SorterRef>,
    ) -> Result<Vec<SortOutcome>, RuntimeError> {
        self.run_until(dataset, sorters, shutdown::shutdown_requested())
            .await
    }

    /// Same as [`run`](Self::run), with `shutdown` standing in for the OS signal.
    pub async fn run_until<F>(
        &self,
        dataset: &[i32],
        sorters: Vec<SorterRef>,
        shutdown: F,
    ) -> Result<Vec<SortOutcome>, RuntimeError>
    where
        F: Future<Output = ()>,
    {
        let token = CancellationToken::new();
        let (reports, report_lane) = mpsc::channel(self.cfg.queue_capacity_clamped());
        let listener = self.subscriber_listener(report_lane);
        let mut background = JoinSet::new();

        let (conduit_tx, conduit_rx) = mpsc::channel(Category::ALL.len());
        let lanes = Lanes {
            comparisons: self.spawn_category(
                &mut background,
                Category::Comparisons,
                conduit_tx.clone(),
            ),
            swaps: self.spawn_category(&mut background, Category::Swaps, conduit_tx),
            reports,
        };

        let registered: Vec<(AlgorithmId, SorterRef)> = sorters
            .into_iter()
            .enumerate()
            .map(|(idx, sorter)| (AlgorithmId(idx as u32 + 1), sorter))
            .collect();
        for (id, _) in &registered {
            lanes.register(*id).await;
        }

        let mut tasks: Vec<SortHandle> = registered
            .into_iter()
            .map(|(id, sorter)| {
                self.spawn_sort(&mut background, &lanes, &token, id, sorter, dataset)
            })
            .collect();
        drop(lanes);

        let barrier = Barrier::new(conduit_rx, self.cfg.barrier_timeout(), self.bus.clone());
        let waited = tokio::select! {
            res = barrier.wait() => res,
            _ = shutdown => {
                self.bus.publish(Event::new(EventKind::ShutdownRequested));
                token.cancel();
                Err(self.stop_within_grace(&mut tasks).await)
            }
        };

        let result = match waited {
            Ok(()) => join_sorts(tasks).await,
            Err(err) => {
                token.cancel();
                for (_, handle) in &tasks {
                    handle.abort();
                }
                Err(err)
            }
        };

        match &result {
            Ok(_) => {
                while background.join_next().await.is_some() {}
                self.bus.publish(Event::new(EventKind::AllCompleted));
            }
            Err(err) => {
                background.shutdown().await;
                self.bus
                    .publish(Event::new(EventKind::RunAborted).with_reason(err.as_label()));
            }
        }
        let _ = listener.await;
        result
    }

    /// Forwards the bus and the report lane to a fresh subscriber set.
    ///
    /// Stops at the first terminal event, after flushing whatever is left on the report
    /// lane, and drains every subscriber queue.
    fn subscriber_listener(&self, mut reports: mpsc::Receiver<Event>) -> JoinHandle<()> {
        let mut rx = self.bus.subscribe();
        let set = SubscriberSet::new(self.subscribers.clone(), self.bus.clone());
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    Some(ev) = reports.recv() => set.emit(&ev),
                    res = rx.recv() => match res {
                        Ok(ev) if ev.is_terminal() => {
                            while let Ok(report) = reports.try_recv() {
                                set.emit(&report);
                            }
                            set.emit(&ev);
                            break;
                        }
                        Ok(ev) => set.emit(&ev),
                        Err(RecvError::Lagged(skipped)) => set.emit(
                            &Event::new(EventKind::SubscriberOverflow).with_reason(format!(
                                "subscriber=listener reason=lagged skipped={skipped}"
                            )),
                        ),
                        Err(RecvError::Closed) => break,
                    },
                }
            }
            set.shutdown().await;
        })
    }

    /// Spawns the supervisor for `category` and returns its inbox.
    fn spawn_category(
        &self,
        background: &mut JoinSet<()>,
        category: Category,
        conduit: mpsc::Sender<Category>,
    ) -> mpsc::Sender<SupervisorMessage> {
        let (tx, rx) = mpsc::channel(self.cfg.queue_capacity_clamped());
        let sup = CategorySupervisor::new(category, rx, conduit, self.bus.clone());
        background.spawn(async move {
            sup.run().await;
        });
        tx
    }

    /// Spawns both observers of one algorithm, then its sort task.
    fn spawn_sort(
        &self,
        background: &mut JoinSet<()>,
        lanes: &Lanes,
        token: &CancellationToken,
        id: AlgorithmId,
        sorter: SorterRef,
        dataset: &[i32],
    ) -> SortHandle {
        let name: Arc<str> = Arc::from(sorter.name());
        let cap = self.cfg.queue_capacity_clamped();
        let step = self.cfg.report_step_clamped();
        let (cmp_tx, cmp_rx) = channel::<ComparisonEvent>(cap);
        let (swp_tx, swp_rx) = channel::<SwapEvent>(cap);

        let comparisons = Observer::new(
            id,
            Arc::clone(&name),
            cmp_rx,
            Progress::new(dataset.len(), step),
            lanes.comparisons.clone(),
            lanes.reports.clone(),
        );
        let swaps = Observer::new(
            id,
            Arc::clone(&name),
            swp_rx,
            Progress::new(dataset.len(), step),
            lanes.swaps.clone(),
            lanes.reports.clone(),
        );
        background.spawn(async move {
            comparisons.run().await;
        });
        background.spawn(async move {
            swaps.run().await;
        });

        let ctx = SortContext::new(dataset.to_vec(), cmp_tx, swp_tx, token.child_token());
        let handle = tokio::spawn(run_sort(id, sorter, ctx, self.bus.clone()));
        (name.to_string(), handle)
    }

    /// Waits for cancelled sort tasks up to the grace period and aborts the rest.
    ///
    /// Returns [`RuntimeError::Canceled`] listing the tasks that had to be aborted.
    async fn stop_within_grace(&self, tasks: &mut [SortHandle]) -> RuntimeError {
        let deadline = tokio::time::Instant::now() + self.cfg.grace;
        let mut stuck = Vec::new();
        for (name, handle) in tasks.iter_mut() {
            if handle.is_finished() {
                continue;
            }
            if tokio::time::timeout_at(deadline, &mut *handle).await.is_err() {
                handle.abort();
                stuck.push(name.clone());
            }
        }
        RuntimeError::Canceled { stuck }
    }
}

/// Joins every sort task in registration order.
///
/// A task that panicked fails the run with [`RuntimeError::TaskPanicked`].
async fn join_sorts(tasks: Vec<SortHandle>) -> Result<Vec<SortOutcome>, RuntimeError> {
    let mut outcomes = Vec::with_capacity(tasks.len());
    let mut panicked = None;
    for (name, handle) in tasks {
        match handle.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(_) => {
                panicked.get_or_insert(name);
            }
        }
    }
    match panicked {
        Some(algorithm) => Err(RuntimeError::TaskPanicked { algorithm }),
        None => Ok(outcomes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    #[derive(Default)]
    struct Collect {
        seen: Mutex<Vec<Event>>,
    }

    #[async_trait]
    impl Subscribe for Collect {
        async fn on_event(&self, event: &Event) {
            self.seen.lock().unwrap().push(event.clone());
        }
        fn name(&self) -> &'static str {
            "collect"
        }
    }

    #[tokio::test]
    async fn test_listener_reports_lag_and_flushes_reports_before_terminal() {
        let cfg = Config {
            bus_capacity: 2,
            ..Config::default()
        };
        let collect = Arc::new(Collect::default());
        let sup = Supervisor::builder(cfg).subscriber(collect.clone()).build();
        let (reports, lane) = mpsc::channel(8);
        let listener = sup.subscriber_listener(lane);

        for _ in 0..4 {
            sup.bus.publish(Event::new(EventKind::SortStarting));
        }
        reports
            .send(Event::new(EventKind::ProgressReported).with_progress(0, 0))
            .await
            .unwrap();
        reports
            .send(Event::new(EventKind::ProgressReported).with_progress(100, 3))
            .await
            .unwrap();
        sup.bus.publish(Event::new(EventKind::AllCompleted));
        listener.await.unwrap();

        let seen = collect.seen.lock().unwrap().clone();
        let overflow = seen
            .iter()
            .find(|e| e.kind == EventKind::SubscriberOverflow)
            .expect("lag is reported");
        assert_eq!(
            overflow.reason.as_deref(),
            Some("subscriber=listener reason=lagged skipped=3")
        );
        let percents: Vec<u32> = seen.iter().filter_map(|e| e.percent).collect();
        assert_eq!(percents, vec![0, 100]);
        assert_eq!(seen.last().unwrap().kind, EventKind::AllCompleted);
    }
}
