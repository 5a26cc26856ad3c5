//! Insertion sort, plus the gapped insertion pass shared with shell and quick sort.

use async_trait::async_trait;

use crate::error::TaskError;
use crate::tasks::{SortContext, Sorter};

/// Grows a sorted prefix one element at a time.
#[derive(Debug, Default, Clone, Copy)]
pub struct InsertionSort;

#[async_trait]
impl Sorter for InsertionSort {
    fn name(&self) -> &str {
        "insertion"
    }

    async fn sort(&self, ctx: &mut SortContext) -> Result<(), TaskError> {
        let len = ctx.len();
        insertion_pass(ctx, 0, len, 1, true).await
    }
}

/// Insertion sort over `start, start + gap, ...` below `end`.
///
/// Each element sinks while it compares lower than its predecessor at distance `gap`.
/// With `track` set, the known-sorted count is advanced by one per integrated element.
pub(crate) async fn insertion_pass(
    ctx: &mut SortContext,
    start: usize,
    end: usize,
    gap: usize,
    track: bool,
) -> Result<(), TaskError> {
    debug_assert!(gap > 0);
    let mut bottom = start + gap;
    while bottom < end {
        let mut scan = bottom;
        while scan >= start + gap && ctx.compare(scan, scan - gap).await? {
            ctx.swap(scan, scan - gap).await?;
            scan -= gap;
        }
        if track {
            ctx.advance_sorted(1);
        }
        bottom += gap;
    }
    Ok(())
}
