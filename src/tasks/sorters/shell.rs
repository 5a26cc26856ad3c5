//! Shell sort over a gap series built from every third Fibonacci number.

use async_trait::async_trait;

use crate::error::TaskError;
use crate::tasks::sorters::insertion::insertion_pass;
use crate::tasks::{SortContext, Sorter};

/// Upper bound on any gap.
const GAP_LIMIT: usize = i32::MAX as usize / 3;

/// Insertion sorts over strided sub-sequences with shrinking gaps, ending at gap 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellSort;

/// Gap series for `len` elements in increasing order: 1, 5, 21, 89, 377, ...
///
/// Every gap is below `len`, so the series is empty for `len <= 1` and otherwise
/// always starts with 1.
pub fn shell_gaps(len: usize) -> Vec<usize> {
    let mut gaps = Vec::new();
    let (mut lower, mut higher) = (1usize, 1usize);
    while higher <= GAP_LIMIT && higher < len {
        gaps.push(higher);
        for _ in 0..3 {
            let next = lower.saturating_add(higher);
            lower = higher;
            higher = next;
        }
    }
    gaps
}

#[async_trait]
impl Sorter for ShellSort {
    fn name(&self) -> &str {
        "shell"
    }

    async fn sort(&self, ctx: &mut SortContext) -> Result<(), TaskError> {
        let len = ctx.len();
        for gap in shell_gaps(len).into_iter().rev() {
            for offset in 0..gap {
                insertion_pass(ctx, offset, len, gap, gap == 1).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::sorters::InsertionSort;
    use crate::tasks::sorters::testing::{scrambled, trace};

    #[test]
    fn test_gap_series() {
        assert!(shell_gaps(0).is_empty());
        assert!(shell_gaps(1).is_empty());
        assert_eq!(shell_gaps(2), vec![1]);
        assert_eq!(shell_gaps(13), vec![1, 5]);
        assert_eq!(shell_gaps(1000), vec![1, 5, 21, 89, 377]);
    }

    #[test]
    fn test_gap_series_respects_limit() {
        let gaps = shell_gaps(usize::MAX);
        assert_eq!(gaps.first(), Some(&1));
        assert!(gaps.iter().all(|&g| g <= GAP_LIMIT));
        assert!(gaps.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_only_final_pass_advances_known_sorted() {
        let input = scrambled(13);
        let t = trace(&ShellSort, &input).await;

        let gap_of = |i: usize, j: usize| i.abs_diff(j);
        let first_unit = t
            .comparisons
            .iter()
            .position(|e| gap_of(e.indices.0, e.indices.1) == 1)
            .unwrap();

        // Gap-5 work comes first and never moves the count.
        assert!(
            t.comparisons[..first_unit]
                .iter()
                .all(|e| gap_of(e.indices.0, e.indices.1) == 5 && e.known_sorted == 0)
        );
        // The gap-1 pass is a suffix.
        assert!(
            t.comparisons[first_unit..]
                .iter()
                .all(|e| gap_of(e.indices.0, e.indices.1) == 1)
        );
        assert_eq!(t.comparisons.last().unwrap().known_sorted, 11);
    }

    #[tokio::test]
    async fn test_final_pass_matches_insertion_sort() {
        let input = scrambled(13);
        let t = trace(&ShellSort, &input).await;

        // Replay the gap-5 swaps to get the array the gap-1 pass started from.
        let mut before_final = input.clone();
        for ev in t.swaps.iter().filter(|e| e.indices.0.abs_diff(e.indices.1) == 5) {
            before_final.swap(ev.indices.0, ev.indices.1);
        }
        let insertion = trace(&InsertionSort, &before_final).await;

        let shell_final: Vec<_> = t
            .comparisons
            .iter()
            .filter(|e| e.indices.0.abs_diff(e.indices.1) == 1)
            .copied()
            .collect();
        assert_eq!(shell_final, insertion.comparisons);
        assert_eq!(t.data, insertion.data);
    }
}
