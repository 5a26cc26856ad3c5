//! # Runtime event subscribers.
//!
//! The [`Subscribe`] trait is the extension point for reacting to runtime events
//! (progress, completions, failures). [`SubscriberSet`] fans events out to several
//! subscribers, each behind its own bounded queue and worker.
//!
//! ## Architecture
//! ```text
//! Observer / CategorySupervisor / runner ── publish(Event) ──► Bus
//!                                                              │
//!                                               subscriber listener (per run)
//!                                                              │
//!                                                       SubscriberSet::emit
//!                                                  ┌───────────┼───────────┐
//!                                                  ▼           ▼           ▼
//!                                              LogWriter  ProgressRecorder  custom
//! ```
//!
//! ## Built-in subscribers
//! - [`LogWriter`]: prints progress lines and lifecycle events to stdout.
//! - [`ProgressRecorder`]: keeps progress reports in memory for inspection.

mod embedded;
mod subscribe;
mod subscriber_set;

pub use embedded::{LogWriter, ProgressRecord, ProgressRecorder};
pub use subscribe::Subscribe;
pub use subscriber_set::SubscriberSet;
