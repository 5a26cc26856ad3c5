//! # Double barrier: wait for both categories to complete.
//!
//! Both category supervisors report on one shared conduit. The barrier opens once it
//! has seen [`Category::Comparisons`] **and** [`Category::Swaps`], in either order;
//! repeated reports are ignored.
//!
//! ```text
//! conduit.recv():
//!   ├─ Some(category) ─► seen.insert(category); open when seen == {comparisons, swaps}
//!   └─ None           ─► SupervisionLost{pending}
//! optional timeout    ─► publish BarrierTimeout, BarrierTimeout{pending}
//! ```

use std::collections::BTreeSet;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::RuntimeError;
use crate::events::{Bus, Category, Event, EventKind};

pub(crate) struct Barrier {
    conduit: mpsc::Receiver<Category>,
    seen: BTreeSet<Category>,
    timeout: Option<Duration>,
    bus: Bus,
}

impl Barrier {
    pub(crate) fn new(
        conduit: mpsc::Receiver<Category>,
        timeout: Option<Duration>,
        bus: Bus,
    ) -> Self {
        Self {
            conduit,
            seen: BTreeSet::new(),
            timeout,
            bus,
        }
    }

    /// Waits until both categories have reported.
    pub(crate) async fn wait(mut self) -> Result<(), RuntimeError> {
        let Some(timeout) = self.timeout else {
            return self.collect().await;
        };

        let res = tokio::time::timeout(timeout, self.collect()).await;
        match res {
            Ok(res) => res,
            Err(_elapsed) => {
                let pending = self.pending();
                self.bus.publish(
                    Event::new(EventKind::BarrierTimeout)
                        .with_reason(format!("pending={pending:?}")),
                );
                Err(RuntimeError::BarrierTimeout { timeout, pending })
            }
        }
    }

    async fn collect(&mut self) -> Result<(), RuntimeError> {
        while self.seen.len() < Category::ALL.len() {
            match self.conduit.recv().await {
                Some(category) => {
                    self.seen.insert(category);
                }
                None => {
                    return Err(RuntimeError::SupervisionLost {
                        pending: self.pending(),
                    });
                }
            }
        }
        Ok(())
    }

    fn pending(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| !self.seen.contains(c))
            .collect()
    }
}
