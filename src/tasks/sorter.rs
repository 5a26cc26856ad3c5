//! # Sorting algorithm abstraction.
//!
//! A [`Sorter`] turns its [`SortContext`]'s dataset into a sorted permutation, going
//! through [`SortContext::compare`] and [`SortContext::swap`] for every element
//! decision and exchange so that each one is emitted as an event first.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TaskError;
use crate::tasks::SortContext;

/// Small integer identifying one registered algorithm within a run (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlgorithmId(pub u32);

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// # Event-emitting sorting algorithm.
///
/// Implementations must:
/// - touch elements only through `ctx.compare` / `ctx.swap`;
/// - keep `ctx`'s known-sorted count non-decreasing;
/// - propagate emission errors with `?` (the runner still ends both streams).
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use sortvisor::{SortContext, Sorter, TaskError};
///
/// struct FirstPair;
///
/// #[async_trait]
/// impl Sorter for FirstPair {
///     fn name(&self) -> &str { "first-pair" }
///
///     async fn sort(&self, ctx: &mut SortContext) -> Result<(), TaskError> {
///         if ctx.len() >= 2 && !ctx.compare(0, 1).await? {
///             ctx.swap(0, 1).await?;
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Sorter: Send + Sync + 'static {
    /// Stable, human-readable algorithm name.
    fn name(&self) -> &str;

    /// Sorts `ctx`'s dataset in place.
    async fn sort(&self, ctx: &mut SortContext) -> Result<(), TaskError>;
}

/// Shared handle to a sorter.
pub type SorterRef = Arc<dyn Sorter>;
