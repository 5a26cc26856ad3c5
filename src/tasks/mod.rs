//! # Sort tasks.
//!
//! - [`Sorter`] - trait every sorting algorithm implements
//! - [`SorterRef`] - shared handle (`Arc<dyn Sorter>`)
//! - [`SortContext`] - a task's private dataset plus its two event queues
//! - [`sorters`] - the five built-in algorithms

mod context;
mod sorter;
pub mod sorters;

pub use context::SortContext;
pub use sorter::{AlgorithmId, Sorter, SorterRef};
