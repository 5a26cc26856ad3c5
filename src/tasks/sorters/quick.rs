//! Quick sort with median-of-three pivots and an explicit worklist.
//!
//! ```text
//! worklist = [0..len)
//! while let Some(range) = worklist.pop_front():
//!   ├─ len(range) <= 5 ─► insertion sort, known_sorted += len(range)
//!   └─ otherwise:
//!        ├─ pivot = median(range[0], range[1], range[2])   (<= 3 comparisons)
//!        ├─ move pivot to range[0], two-pointer partition
//!        ├─ move pivot to its final slot p, known_sorted += 1
//!        └─ push_front(p+1..end), then push_front(start..p)
//! ```

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::error::TaskError;
use crate::tasks::sorters::insertion::insertion_pass;
use crate::tasks::{SortContext, Sorter};

/// Ranges up to this length are insertion sorted instead of partitioned.
const INSERTION_CUTOFF: usize = 5;

/// Partitioning sort driven by a front-loaded worklist.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuickSort;

/// Half-open index range `start..end` still to be sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortRange {
    pub start: usize,
    pub end: usize,
}

impl SortRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Ranges waiting to be sorted; popped from the front.
#[derive(Debug, Default)]
pub struct Worklist {
    ranges: VecDeque<SortRange>,
}

impl Worklist {
    /// Creates a worklist holding `initial`.
    pub fn new(initial: SortRange) -> Self {
        Self {
            ranges: VecDeque::from([initial]),
        }
    }

    /// Takes the next range.
    pub fn pop(&mut self) -> Option<SortRange> {
        self.ranges.pop_front()
    }

    /// Queues both sides of a partition in front of older work, `below` first.
    pub fn push_split(&mut self, below: SortRange, above: SortRange) {
        self.ranges.push_front(above);
        self.ranges.push_front(below);
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Pending ranges in pop order.
    pub fn iter(&self) -> impl Iterator<Item = &SortRange> {
        self.ranges.iter()
    }
}

#[async_trait]
impl Sorter for QuickSort {
    fn name(&self) -> &str {
        "quick"
    }

    async fn sort(&self, ctx: &mut SortContext) -> Result<(), TaskError> {
        let mut work = Worklist::new(SortRange::new(0, ctx.len()));
        while let Some(range) = work.pop() {
            step(ctx, range, &mut work).await?;
        }
        Ok(())
    }
}

/// Sorts one range: small ones directly, larger ones by partitioning and queueing both sides.
pub(crate) async fn step(
    ctx: &mut SortContext,
    range: SortRange,
    work: &mut Worklist,
) -> Result<(), TaskError> {
    if range.len() <= INSERTION_CUTOFF {
        insertion_pass(ctx, range.start, range.end, 1, false).await?;
        ctx.advance_sorted(range.len());
        return Ok(());
    }
    let pivot = partition(ctx, range).await?;
    ctx.advance_sorted(1);
    work.push_split(
        SortRange::new(range.start, pivot),
        SortRange::new(pivot + 1, range.end),
    );
    Ok(())
}

/// Index of the median of the three elements starting at `top`.
async fn select_pivot(ctx: &mut SortContext, top: usize) -> Result<usize, TaskError> {
    let (a, b, c) = (top, top + 1, top + 2);
    if ctx.compare(a, b).await? {
        if ctx.compare(b, c).await? {
            // a < b < c
            return Ok(b);
        }
        // a < b, c <= b
        return Ok(if ctx.compare(a, c).await? { c } else { a });
    }
    // b <= a
    if ctx.compare(b, c).await? {
        // b <= a, b < c
        return Ok(if ctx.compare(a, c).await? { a } else { c });
    }
    // c <= b <= a
    Ok(b)
}

/// Partitions `range` (length > 5) around a median-of-three pivot.
///
/// Returns the pivot's final index: everything before it is `<=` the pivot, everything
/// after it `>=`. Once a swap has happened, the element just moved to the upper scan
/// position is known to be `>=` the pivot and is stepped over without a comparison.
pub(crate) async fn partition(ctx: &mut SortContext, range: SortRange) -> Result<usize, TaskError> {
    debug_assert!(range.len() > INSERTION_CUTOFF);
    let top = range.start;
    let pivot = select_pivot(ctx, top).await?;
    ctx.swap(pivot, top).await?;

    let mut low = top + 1;
    let mut high = range.end - 1;
    let mut swapped = false;
    while low < high {
        while low < high && ctx.compare(low, top).await? {
            low += 1;
        }
        if low < high && swapped {
            high -= 1;
        }
        while low < high && ctx.compare(top, high).await? {
            high -= 1;
        }
        if low < high {
            ctx.swap(low, high).await?;
            swapped = true;
            low += 1;
        }
    }

    let place = low - 1;
    ctx.swap(top, place).await?;
    Ok(place)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_util::sync::CancellationToken;

    use crate::events::{ComparisonEvent, EventReceiver, StreamItem, SwapEvent, channel};
    use crate::tasks::sorters::testing::{scrambled, trace};

    fn context(
        data: Vec<i32>,
    ) -> (
        SortContext,
        EventReceiver<ComparisonEvent>,
        EventReceiver<SwapEvent>,
    ) {
        let (cmp_tx, cmp_rx) = channel(256);
        let (swp_tx, swp_rx) = channel(256);
        (
            SortContext::new(data, cmp_tx, swp_tx, CancellationToken::new()),
            cmp_rx,
            swp_rx,
        )
    }

    async fn collect<E: crate::events::StreamEvent>(rx: &mut EventReceiver<E>) -> Vec<E> {
        let mut out = Vec::new();
        while let Some(StreamItem::Data(ev)) = rx.recv().await {
            out.push(ev);
        }
        out
    }

    #[tokio::test]
    async fn test_pivot_is_median_of_first_three() {
        for (data, expected) in [
            (vec![1, 2, 3], 1),
            (vec![1, 3, 2], 2),
            (vec![2, 3, 1], 0),
            (vec![2, 1, 3], 0),
            (vec![3, 1, 2], 2),
            (vec![3, 2, 1], 1),
            (vec![5, 3, 5], 2),
        ] {
            let (mut ctx, _c, _s) = context(data.clone());
            let idx = select_pivot(&mut ctx, 0).await.unwrap();
            let mut sorted = data.clone();
            sorted.sort_unstable();
            assert_eq!(idx, expected, "{data:?}");
            assert_eq!(data[idx], sorted[1], "{data:?}");
        }
    }

    #[tokio::test]
    async fn test_partition_six_elements() {
        let (mut ctx, mut cmp, mut swp) = context(vec![5, 3, 5, 1, 4, 2]);
        let mut work = Worklist::default();
        step(&mut ctx, SortRange::new(0, 6), &mut work).await.unwrap();

        assert_eq!(ctx.data(), &[4, 3, 2, 1, 5, 5]);
        assert_eq!(ctx.known_sorted(), 1);
        let queued: Vec<SortRange> = work.iter().copied().collect();
        assert_eq!(queued, vec![SortRange::new(0, 4), SortRange::new(5, 6)]);

        drop(ctx);
        let comparisons = collect(&mut cmp).await;
        let swaps = collect(&mut swp).await;
        // Three comparisons pick the pivot, then the scans.
        assert_eq!(
            comparisons[..3].iter().map(|e| e.indices).collect::<Vec<_>>(),
            vec![(0, 1), (1, 2), (0, 2)]
        );
        assert_eq!(
            swaps.iter().map(|e| e.indices).collect::<Vec<_>>(),
            vec![(2, 0), (2, 5), (0, 4)]
        );
    }

    #[tokio::test]
    async fn test_skips_known_upper_element_after_swap() {
        let (mut ctx, mut cmp, _swp) = context(vec![5, 3, 5, 1, 4, 2]);
        partition(&mut ctx, SortRange::new(0, 6)).await.unwrap();
        drop(ctx);
        let comparisons = collect(&mut cmp).await;
        // Index 5 receives a value >= pivot through the swap and is never compared again.
        let after_swap = comparisons.iter().skip_while(|e| e.indices != (0, 5)).skip(1);
        assert!(after_swap.clone().all(|e| e.indices.1 != 5 && e.indices.0 != 5));
        assert!(comparisons.iter().any(|e| e.indices == (0, 5)));
    }

    #[tokio::test]
    async fn test_small_ranges_use_insertion() {
        let (mut ctx, _cmp, _swp) = context(vec![5, 4, 3, 2, 1]);
        let mut work = Worklist::default();
        step(&mut ctx, SortRange::new(0, 5), &mut work).await.unwrap();
        assert!(work.is_empty());
        assert_eq!(ctx.data(), &[1, 2, 3, 4, 5]);
        assert_eq!(ctx.known_sorted(), 5);
    }

    #[test]
    fn test_worklist_pops_below_before_above_before_older() {
        let mut work = Worklist::new(SortRange::new(10, 20));
        work.push_split(SortRange::new(0, 3), SortRange::new(4, 9));
        assert_eq!(work.pop(), Some(SortRange::new(0, 3)));
        assert_eq!(work.pop(), Some(SortRange::new(4, 9)));
        assert_eq!(work.pop(), Some(SortRange::new(10, 20)));
        assert_eq!(work.pop(), None);
    }

    #[tokio::test]
    async fn test_every_element_is_counted_once() {
        let input = scrambled(101);
        let (cmp_tx, mut cmp_rx) = channel(64);
        let (swp_tx, mut swp_rx) = channel(64);
        let drain_cmp = tokio::spawn(async move { collect(&mut cmp_rx).await });
        let drain_swp = tokio::spawn(async move { collect(&mut swp_rx).await });

        let mut ctx = SortContext::new(input, cmp_tx, swp_tx, CancellationToken::new());
        QuickSort.sort(&mut ctx).await.unwrap();
        assert_eq!(ctx.known_sorted(), 101);
        drop(ctx);
        drain_cmp.await.unwrap();
        drain_swp.await.unwrap();

        let t = trace(&QuickSort, &scrambled(101)).await;
        assert!(t.comparisons.iter().all(|e| e.known_sorted < 101));
    }
}
