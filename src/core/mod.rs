//! Runtime core: wiring, supervision and lifecycle of one sorting race.
//!
//! The public API from this module is [`Supervisor`] (with [`SupervisorBuilder`] and
//! [`Config`]), plus [`run_sort`] for driving a single sorter by hand.
//!
//! Internal modules:
//! - [`runner`]: runs one sorter and guarantees its end-of-stream pair;
//! - [`observer`]: turns one event queue into progress reports and a completion message;
//! - [`category`]: per-category active set and the exactly-once completion report;
//! - [`barrier`]: the double barrier over both categories;
//! - [`supervisor`]: wires a run, handles shutdown and joins the results;
//! - [`shutdown`]: cross-platform shutdown signal handling.

mod barrier;
mod builder;
mod category;
mod config;
mod observer;
mod runner;
mod shutdown;
mod supervisor;

pub use builder::SupervisorBuilder;
pub use category::SupervisorMessage;
pub use config::Config;
pub use runner::{SortOutcome, run_sort};
pub use supervisor::Supervisor;
