//! # ProgressRecorder – keep progress reports in memory
//!
//! Records every [`EventKind::ProgressReported`] and [`EventKind::AlgorithmCompleted`]
//! event so callers (and tests) can inspect how each algorithm advanced.
//!
//! ```text
//! on_event(ev):
//!   ├─ ProgressReported   => push ProgressRecord
//!   ├─ AlgorithmCompleted => store total per (algorithm, category)
//!   └─ otherwise: ignore
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::events::{Category, Event, EventKind};
use crate::subscribers::Subscribe;

/// One recorded threshold crossing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    /// Algorithm name.
    pub algorithm: String,
    /// Category the report belongs to.
    pub category: Category,
    /// Threshold crossed, in percent.
    pub percent: u32,
    /// Events of this category seen when the threshold was crossed.
    pub count: u64,
}

#[derive(Default)]
struct Inner {
    records: Vec<ProgressRecord>,
    totals: HashMap<(String, Category), u64>,
}

/// In-memory progress subscriber.
#[derive(Default)]
pub struct ProgressRecorder {
    inner: Mutex<Inner>,
}

impl ProgressRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded threshold crossings, in arrival order.
    #[must_use]
    pub fn records(&self) -> Vec<ProgressRecord> {
        self.lock().records.clone()
    }

    /// Crossings recorded for one algorithm and category, in arrival order.
    #[must_use]
    pub fn records_for(&self, algorithm: &str, category: Category) -> Vec<ProgressRecord> {
        self.lock()
            .records
            .iter()
            .filter(|r| r.algorithm == algorithm && r.category == category)
            .cloned()
            .collect()
    }

    /// Total events reported on completion for one algorithm and category.
    #[must_use]
    pub fn total(&self, algorithm: &str, category: Category) -> Option<u64> {
        self.lock()
            .totals
            .get(&(algorithm.to_string(), category))
            .copied()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Subscribe for ProgressRecorder {
    async fn on_event(&self, ev: &Event) {
        let (Some(alg), Some(category)) = (ev.algorithm.as_deref(), ev.category) else {
            return;
        };
        match ev.kind {
            EventKind::ProgressReported => {
                if let (Some(percent), Some(count)) = (ev.percent, ev.count) {
                    self.lock().records.push(ProgressRecord {
                        algorithm: alg.to_string(),
                        category,
                        percent,
                        count,
                    });
                }
            }
            EventKind::AlgorithmCompleted => {
                self.lock()
                    .totals
                    .insert((alg.to_string(), category), ev.count.unwrap_or(0));
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "ProgressRecorder"
    }

    fn queue_capacity(&self) -> usize {
        4096
    }
}
