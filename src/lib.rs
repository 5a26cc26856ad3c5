//! # sortvisor
//!
//! **Sortvisor** races several sorting algorithms concurrently over copies of the same
//! dataset and supervises their event streams until every algorithm has finished.
//!
//! Every comparison and every exchange a sorter performs is emitted as an event on a
//! bounded queue. Observers turn those streams into progress reports; two category
//! supervisors and a double barrier decide when the whole race is over.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   run_sort   │   │   run_sort   │   │   run_sort   │
//!     │   (bubble)   │   │   (shell)    │   │   (quick)    │
//!     └──┬────────┬──┘   └──┬────────┬──┘   └──┬────────┬──┘
//!        │ cmp    │ swp     │ cmp    │ swp     │ cmp    │ swp     bounded queues
//!        ▼        ▼         ▼        ▼         ▼        ▼         (queue_capacity)
//!     Observer Observer  Observer Observer  Observer Observer
//!        │        │         │        │         │        │
//!        │ Completed{id}    │        │         │        │
//!        ▼        ▼         ▼        ▼         ▼        ▼
//! ┌──────────────────────────────┐   ┌──────────────────────────────┐
//! │ CategorySupervisor (cmp)     │   │ CategorySupervisor (swaps)   │
//! │ active set, reports once     │   │ active set, reports once     │
//! └──────────────┬───────────────┘   └───────────────┬──────────────┘
//!                └──────────────► conduit ◄───────────┘
//!                                   │
//!                                   ▼
//!                        Barrier (both categories)
//!                                   │
//!                                   ▼
//!                   Supervisor joins tasks → Vec<SortOutcome>
//! ```
//!
//! Lifecycle events (starts, completions, failures) are published on a broadcast
//! [`Bus`](events::Bus). Observer reports take a bounded lane instead, so progress is
//! never skipped. Both are fanned out to [`Subscribe`] implementations through a
//! [`SubscriberSet`].
//!
//! ### Lifecycle
//! ```text
//! Supervisor::run(dataset, sorters)
//!   ├─► Started{id} for every sorter, in both categories
//!   ├─► spawn 2 observers + 1 sort task per sorter
//!   ├─► Barrier::wait()            (optional Config::timeout)
//!   │     └─ OS signal ─► cancel all ─► wait Config::grace ─► RuntimeError::Canceled
//!   ├─► join sort tasks            (panic ─► RuntimeError::TaskPanicked)
//!   ├─► publish AllCompleted, drain subscribers
//!   └─► Ok(outcomes)               (registration order)
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                          |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Sorters**       | Five built-in algorithms sharing one emission contract.     | [`Sorter`], [`SortContext`], [`sorters`]    |
//! | **Supervision**   | Observers, category supervisors and the double barrier.      | [`Supervisor`], [`SupervisorBuilder`]       |
//! | **Subscriber API**| Hook into progress and lifecycle events.                     | [`Subscribe`], [`LogWriter`], [`ProgressRecorder`] |
//! | **Errors**        | Typed errors for the runtime and for sort tasks.             | [`RuntimeError`], [`TaskError`]             |
//! | **Configuration** | Queue sizes, report step, barrier timeout, grace period.     | [`Config`]                                  |
//! | **Helpers**       | Shuffled datasets and sortedness reports.                    | [`dataset`], [`verify`]                     |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use sortvisor::{Config, LogWriter, Subscribe, Supervisor, dataset, sorters, verify::SortReport};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
//!     let sup = Supervisor::builder(Config::default())
//!         .with_subscribers(subs)
//!         .build();
//!
//!     let data = dataset::shuffled(50);
//!     for outcome in sup.run(&data, sorters::all()).await? {
//!         let report = SortReport::new(&outcome.name, &outcome.data);
//!         assert!(report.is_sorted());
//!     }
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod tasks;

pub mod dataset;
pub mod events;
pub mod subscribers;
pub mod verify;

// ---- Public re-exports ----

pub use core::{
    Config, SortOutcome, Supervisor, SupervisorBuilder, SupervisorMessage, run_sort,
};
pub use error::{RuntimeError, TaskError};
pub use events::{Category, ComparisonEvent, Event, EventKind, StreamItem, SwapEvent};
pub use subscribers::{LogWriter, ProgressRecord, ProgressRecorder, Subscribe, SubscriberSet};
pub use tasks::{AlgorithmId, SortContext, Sorter, SorterRef, sorters};
