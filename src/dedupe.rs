// 🔍 Record Deduplicator - keep the first row seen for each key
//
// Later rows with the same key are dropped outright, even when their other
// fields differ. Nothing is merged. Callers that care can inspect
// `DedupeReport::dropped` to see which input rows were discarded.

use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq)]
pub struct DedupeReport<T> {
    /// Surviving rows, in original order
    pub rows: Vec<T>,

    /// 0-based input indices of the discarded rows
    pub dropped: Vec<usize>,
}

/// Remove every row whose key was already seen earlier in `rows`
///
/// The input slice is left untouched; survivors are cloned into a new table.
pub fn dedupe_by_key<T, K, F>(rows: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    dedupe_with_report(rows, key).rows
}

/// Same as `dedupe_by_key`, also reporting which rows were dropped
pub fn dedupe_with_report<T, K, F>(rows: &[T], key: F) -> DedupeReport<T>
where
    T: Clone,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::with_capacity(rows.len());
    let mut kept = Vec::with_capacity(rows.len());
    let mut dropped = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        if seen.insert(key(row)) {
            kept.push(row.clone());
        } else {
            dropped.push(idx);
        }
    }

    DedupeReport {
        rows: kept,
        dropped,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: &'static str,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, name: "Ann" },
            Row { id: 2, name: "Bob" },
            Row { id: 1, name: "ann-dup" },
            Row { id: 3, name: "Cy" },
            Row { id: 2, name: "bob-dup" },
        ]
    }

    #[test]
    fn test_keeps_first_occurrence_in_order() {
        let out = dedupe_by_key(&rows(), |r| r.id);

        assert_eq!(
            out,
            vec![
                Row { id: 1, name: "Ann" },
                Row { id: 2, name: "Bob" },
                Row { id: 3, name: "Cy" },
            ]
        );
    }

    #[test]
    fn test_report_lists_dropped_indices() {
        let report = dedupe_with_report(&rows(), |r| r.id);

        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.dropped, vec![2, 4]);
    }

    #[test]
    fn test_idempotent() {
        let once = dedupe_by_key(&rows(), |r| r.id);
        let twice = dedupe_by_key(&once, |r| r.id);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_untouched() {
        let input = rows();
        let _ = dedupe_by_key(&input, |r| r.id);

        assert_eq!(input, rows());
    }

    #[test]
    fn test_composite_key() {
        let input = vec![(1, "a", 10), (1, "b", 20), (1, "a", 30)];
        let out = dedupe_by_key(&input, |r| (r.0, r.1));

        assert_eq!(out, vec![(1, "a", 10), (1, "b", 20)]);
    }

    #[test]
    fn test_empty_table() {
        let input: Vec<Row> = Vec::new();
        let report = dedupe_with_report(&input, |r| r.id);

        assert!(report.rows.is_empty());
        assert!(report.dropped.is_empty());
    }
}
