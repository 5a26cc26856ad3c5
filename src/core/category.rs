//! # Category supervisor: completion of one category across all algorithms.
//!
//! Two run per [`Supervisor::run`](crate::Supervisor::run): one for comparisons, one
//! for swaps. The active set is private and only touched by the message loop.
//!
//! ```text
//! inbox.recv():
//!   ├─ Started{id}   ─► active.insert(id)
//!   ├─ Completed{id} ─► active.remove(id)   (ignored before the first start)
//!   └─ closed        ─► stop
//! stop once active is empty after at least one start
//!   └─► publish CategoryCompleted, report category on the shared conduit (once)
//! ```
//!
//! ## Rules
//! - Reports **at most once** and then exits.
//! - If the inbox closes before any start, there is nothing to wait for: report at once.
//! - If the inbox closes while algorithms are still active, exit **without** reporting.

use std::collections::HashSet;

use tokio::sync::mpsc;

use crate::events::{Bus, Category, Event, EventKind};
use crate::tasks::AlgorithmId;

/// Registration message sent to a category supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorMessage {
    /// An algorithm is running in this category.
    Started { id: AlgorithmId },
    /// The algorithm's observer in this category is done.
    Completed { id: AlgorithmId },
}

/// Aggregates observer completions for one category.
pub(crate) struct CategorySupervisor {
    category: Category,
    inbox: mpsc::Receiver<SupervisorMessage>,
    conduit: mpsc::Sender<Category>,
    bus: Bus,
}

impl CategorySupervisor {
    pub(crate) fn new(
        category: Category,
        inbox: mpsc::Receiver<SupervisorMessage>,
        conduit: mpsc::Sender<Category>,
        bus: Bus,
    ) -> Self {
        Self {
            category,
            inbox,
            conduit,
            bus,
        }
    }

    /// Runs the message loop; returns true if completion was reported.
    pub(crate) async fn run(mut self) -> bool {
        let mut active: HashSet<AlgorithmId> = HashSet::new();
        let mut started = false;

        while let Some(msg) = self.inbox.recv().await {
            match msg {
                SupervisorMessage::Started { id } => {
                    started = true;
                    active.insert(id);
                }
                SupervisorMessage::Completed { id } => {
                    active.remove(&id);
                }
            }
            if started && active.is_empty() {
                return self.report().await;
            }
        }

        // Inbox closed.
        if active.is_empty() {
            return self.report().await;
        }
        false
    }

    async fn report(self) -> bool {
        self.bus
            .publish(Event::new(EventKind::CategoryCompleted).with_category(self.category));
        self.conduit.send(self.category).await.is_ok()
    }
}
