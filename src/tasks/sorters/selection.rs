//! Selection sort: find the smallest unsorted element, move it to `top`.

use async_trait::async_trait;

use crate::error::TaskError;
use crate::tasks::{SortContext, Sorter};

/// Places the `top`-th smallest element at `top` on each pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectionSort;

#[async_trait]
impl Sorter for SelectionSort {
    fn name(&self) -> &str {
        "selection"
    }

    async fn sort(&self, ctx: &mut SortContext) -> Result<(), TaskError> {
        let Some(bottom) = ctx.len().checked_sub(1) else {
            return Ok(());
        };
        for top in 0..bottom {
            let mut lowest = top;
            for scan in (top + 1..=bottom).rev() {
                if ctx.compare(scan, lowest).await? {
                    lowest = scan;
                }
            }
            ctx.swap(top, lowest).await?;
            ctx.mark_sorted(top + 1);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::sorters::testing::trace;

    #[tokio::test]
    async fn test_at_most_one_swap_per_position() {
        let t = trace(&SelectionSort, &[4, 3, 2, 1, 0]).await;
        assert_eq!(t.data, vec![0, 1, 2, 3, 4]);
        assert_eq!(t.comparisons.len(), 4 + 3 + 2 + 1);
        // 0<->4 and 1<->3; position 2 is already in place.
        assert_eq!(t.swaps.len(), 2);
        assert_eq!(t.swaps[1].known_sorted, 1);
    }
}
