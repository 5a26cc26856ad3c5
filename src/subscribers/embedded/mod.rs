//! # Built-in subscribers
//!
//! - [`LogWriter`]: prints progress lines and lifecycle events to stdout.
//! - [`ProgressRecorder`]: stores progress reports in memory.

mod log;
mod progress;

pub use log::LogWriter;
pub use progress::{ProgressRecord, ProgressRecorder};
