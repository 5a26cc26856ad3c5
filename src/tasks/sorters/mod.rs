//! # Built-in sorting algorithms.
//!
//! All five share the emission contract of [`SortContext`](crate::SortContext); they
//! differ in traversal order and in what the known-sorted count means:
//!
//! | Algorithm   | Known-sorted count                                        |
//! |-------------|-----------------------------------------------------------|
//! | [`BubbleSort`]    | `top + 1` once position `top` holds its final value  |
//! | [`SelectionSort`] | `top + 1` once the `top`-th smallest is placed       |
//! | [`InsertionSort`] | `bottom` once element `bottom` joins the prefix      |
//! | [`ShellSort`]     | as insertion, during the gap-1 pass only             |
//! | [`QuickSort`]     | +1 per placed pivot, +len per finished small range   |

use std::sync::Arc;

mod bubble;
mod insertion;
mod quick;
mod selection;
mod shell;

pub use bubble::BubbleSort;
pub use insertion::InsertionSort;
pub use quick::{QuickSort, SortRange, Worklist};
pub use selection::SelectionSort;
pub use shell::{ShellSort, shell_gaps};

use crate::tasks::SorterRef;

/// The five built-in sorters in registration order.
pub fn all() -> Vec<SorterRef> {
    vec![
        Arc::new(BubbleSort),
        Arc::new(SelectionSort),
        Arc::new(InsertionSort),
        Arc::new(ShellSort),
        Arc::new(QuickSort),
    ]
}
