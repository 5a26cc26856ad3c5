//! Bubble sort: each pass carries the smallest remaining element down to `top`.

use async_trait::async_trait;

use crate::error::TaskError;
use crate::tasks::{SortContext, Sorter};

/// Repeated adjacent-exchange passes over a shrinking unsorted region.
#[derive(Debug, Default, Clone, Copy)]
pub struct BubbleSort;

#[async_trait]
impl Sorter for BubbleSort {
    fn name(&self) -> &str {
        "bubble"
    }

    async fn sort(&self, ctx: &mut SortContext) -> Result<(), TaskError> {
        let Some(bottom) = ctx.len().checked_sub(1) else {
            return Ok(());
        };
        for top in 0..bottom {
            for pos in (top..bottom).rev() {
                if !ctx.compare(pos, pos + 1).await? {
                    ctx.swap(pos, pos + 1).await?;
                }
            }
            ctx.mark_sorted(top + 1);
        }
        Ok(())
    }
}
