//! # LogWriter: progress and lifecycle printer
//!
//! Prints progress reports in the line format consumers grep for, and every other
//! runtime event in a bracketed form.
//!
//! ## Example output
//! ```text
//! algorithm quick at 40% with 2817 comparisons
//! algorithm bubble at 20% with 7411 swaps
//! [starting] algorithm=shell
//! [finished] algorithm=shell
//! [algorithm-complete] algorithm=shell category=swaps total=8112
//! [category-complete] category=comparisons
//! [all-complete]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders one progress line, or `None` if the event is not a complete progress report.
    pub fn progress_line(e: &Event) -> Option<String> {
        match (&e.algorithm, e.category, e.percent, e.count) {
            (Some(alg), Some(cat), Some(pct), Some(n)) => {
                Some(format!("algorithm {alg} at {pct}% with {n} {cat}"))
            }
            _ => None,
        }
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let alg = e.algorithm.as_deref().unwrap_or("unknown");
        match e.kind {
            EventKind::ProgressReported => {
                if let Some(line) = Self::progress_line(e) {
                    println!("{line}");
                }
            }
            EventKind::SortStarting => println!("[starting] algorithm={alg}"),
            EventKind::SortFinished => println!("[finished] algorithm={alg}"),
            EventKind::SortFailed => {
                println!("[failed] algorithm={alg} err={:?}", e.reason);
            }
            EventKind::StreamClosed => {
                println!(
                    "[stream-closed] algorithm={alg} category={:?} seen={:?}",
                    e.category, e.count
                );
            }
            EventKind::SupervisorUnreachable => {
                println!(
                    "[supervisor-unreachable] algorithm={alg} category={:?}",
                    e.category
                );
            }
            EventKind::AlgorithmCompleted => {
                println!(
                    "[algorithm-complete] algorithm={alg} category={} total={}",
                    e.category.map(|c| c.as_str()).unwrap_or("unknown"),
                    e.count.unwrap_or(0)
                );
            }
            EventKind::CategoryCompleted => {
                println!(
                    "[category-complete] category={}",
                    e.category.map(|c| c.as_str()).unwrap_or("unknown")
                );
            }
            EventKind::AllCompleted => println!("[all-complete]"),
            EventKind::ShutdownRequested => println!("[shutdown-requested]"),
            EventKind::BarrierTimeout => {
                println!("[barrier-timeout] pending={:?}", e.reason);
            }
            EventKind::RunAborted => println!("[run-aborted] reason={:?}", e.reason),
            EventKind::SubscriberOverflow => {
                println!("[subscriber-overflow] {:?}", e.reason);
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] {}",
                    e.reason.as_deref().unwrap_or("unknown")
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
