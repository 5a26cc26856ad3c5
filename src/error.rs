//! Error types used by the sortvisor runtime and sort tasks.
//!
//! - [`RuntimeError`] errors raised by the supervision runtime itself.
//! - [`TaskError`] errors raised while a sort task emits events.
//!
//! Both provide `as_label` for logs; [`RuntimeError`] also has `as_message`.

use std::time::Duration;
use thiserror::Error;

use crate::events::Category;

/// # Errors produced by the sortvisor runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The double barrier did not see both categories complete in time.
    #[error("barrier timeout {timeout:?} exceeded; pending: {pending:?}")]
    BarrierTimeout {
        /// The configured barrier timeout.
        timeout: Duration,
        /// Categories that had not reported completion.
        pending: Vec<Category>,
    },

    /// Shutdown was requested before all algorithms completed.
    #[error("run cancelled by shutdown signal; stuck: {stuck:?}")]
    Canceled {
        /// Sort tasks that did not exit within the grace period.
        stuck: Vec<String>,
    },

    /// Every category supervisor exited but not all categories reported completion.
    #[error("supervision channel closed; pending: {pending:?}")]
    SupervisionLost {
        /// Categories that never reported completion.
        pending: Vec<Category>,
    },

    /// A sort task panicked instead of finishing its stream.
    #[error("sort task '{algorithm}' panicked")]
    TaskPanicked {
        /// Name of the algorithm whose task panicked.
        algorithm: String,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use sortvisor::RuntimeError;
    ///
    /// let err = RuntimeError::Canceled { stuck: vec![] };
    /// assert_eq!(err.as_label(), "runtime_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::BarrierTimeout { .. } => "runtime_barrier_timeout",
            RuntimeError::Canceled { .. } => "runtime_canceled",
            RuntimeError::SupervisionLost { .. } => "runtime_supervision_lost",
            RuntimeError::TaskPanicked { .. } => "runtime_task_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::BarrierTimeout { timeout, pending } => {
                format!("barrier timed out after {timeout:?}; pending categories={pending:?}")
            }
            RuntimeError::Canceled { stuck } => {
                format!("cancelled; stuck tasks={stuck:?}")
            }
            RuntimeError::SupervisionLost { pending } => {
                format!("supervision lost; pending categories={pending:?}")
            }
            RuntimeError::TaskPanicked { algorithm } => {
                format!("sort task panicked: {algorithm}")
            }
        }
    }
}

/// # Errors produced while a sort task emits events.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// The runtime token was cancelled while the task was emitting.
    #[error("context cancelled")]
    Canceled,

    /// The observer for this category is gone; nothing can be emitted.
    #[error("{category} stream closed")]
    StreamClosed {
        /// Category of the closed stream.
        category: Category,
    },
}

impl TaskError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use sortvisor::TaskError;
    ///
    /// assert_eq!(TaskError::Canceled.as_label(), "task_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Canceled => "task_canceled",
            TaskError::StreamClosed { .. } => "task_stream_closed",
        }
    }
}
