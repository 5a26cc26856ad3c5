//! Post-run sortedness check.
//!
//! ```text
//! quick correctly sorted.
//!
//! bubble not correctly sorted - some elements are out of order
//! Incorrect order: 7 was positioned before 3
//! 1
//! 7
//! 3
//! ```

use std::fmt;

/// Adjacent pair in the wrong order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inversion {
    /// Index of the first element of the pair.
    pub index: usize,
    /// Value at `index`.
    pub before: i32,
    /// Value at `index + 1`, lower than `before`.
    pub after: i32,
}

/// Every adjacent out-of-order pair in `data`, scanning to the end.
pub fn inversions(data: &[i32]) -> Vec<Inversion> {
    data.windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] > w[1])
        .map(|(index, w)| Inversion {
            index,
            before: w[0],
            after: w[1],
        })
        .collect()
}

/// Final report for one algorithm; its `Display` form is what the driver prints.
#[derive(Debug)]
pub struct SortReport<'a> {
    name: &'a str,
    data: &'a [i32],
    inversions: Vec<Inversion>,
}

impl<'a> SortReport<'a> {
    pub fn new(name: &'a str, data: &'a [i32]) -> Self {
        Self {
            name,
            data,
            inversions: inversions(data),
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.inversions.is_empty()
    }

    pub fn inversions(&self) -> &[Inversion] {
        &self.inversions
    }
}

impl fmt::Display for SortReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sorted() {
            return writeln!(f, "{} correctly sorted.", self.name);
        }
        writeln!(
            f,
            "{} not correctly sorted - some elements are out of order",
            self.name
        )?;
        for inv in &self.inversions {
            writeln!(f, "Incorrect order: {} was positioned before {}", inv.before, inv.after)?;
        }
        for value in self.data {
            writeln!(f, "{value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_every_inversion() {
        let found = inversions(&[1, 7, 3, 4, 2]);
        assert_eq!(
            found,
            vec![
                Inversion { index: 1, before: 7, after: 3 },
                Inversion { index: 3, before: 4, after: 2 },
            ]
        );
    }

    #[test]
    fn test_sorted_and_tiny_inputs() {
        assert!(inversions(&[]).is_empty());
        assert!(inversions(&[5]).is_empty());
        assert!(inversions(&[1, 1, 2]).is_empty());
    }

    #[test]
    fn test_sorted_report() {
        let report = SortReport::new("quick", &[1, 2, 3]);
        assert!(report.is_sorted());
        assert_eq!(report.to_string(), "quick correctly sorted.\n");
    }

    #[test]
    fn test_unsorted_report_lists_pairs_then_dumps() {
        let report = SortReport::new("bubble", &[1, 7, 3]);
        assert_eq!(
            report.to_string(),
            "bubble not correctly sorted - some elements are out of order\n\
             Incorrect order: 7 was positioned before 3\n\
             1\n7\n3\n"
        );
    }
}
