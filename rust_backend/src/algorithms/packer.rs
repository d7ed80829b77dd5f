//! Row packing: greedy interval-graph colouring of one subject's rentals.
//!
//! Rentals are sorted by start (ties: end, then rental id) and each one is
//! placed on the first row whose last rental ended strictly before it starts.
//! End dates are inclusive, so a rental ending on day 10 and another starting
//! on day 10 never share a row. Processing in start order makes first-fit
//! optimal: the row count equals the largest number of rentals open on a
//! single day.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::domain::{ClippedInterval, RowAssignment, SubjectId};

/// Row assignments of a single subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackedRows {
    /// Assignments in packing order (start, end, rental id).
    pub assignments: Vec<RowAssignment>,
    pub row_count: usize,
}

impl PackedRows {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Assignments placed on `row`, in packing order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &RowAssignment> {
        self.assignments.iter().filter(move |a| a.row == row)
    }
}

fn packing_order(a: &ClippedInterval, b: &ClippedInterval) -> std::cmp::Ordering {
    a.start
        .cmp(&b.start)
        .then(a.end.cmp(&b.end))
        .then_with(|| a.id().cmp(b.id()))
}

/// Assign rows to the rentals of one subject.
///
/// The caller is responsible for passing a single subject's rentals; use
/// [`pack_by_subject`] for mixed input. Never fails: zero rentals yield zero
/// rows.
pub fn pack_rows(intervals: &[ClippedInterval]) -> PackedRows {
    let mut sorted: Vec<&ClippedInterval> = intervals.iter().collect();
    sorted.sort_by(|a, b| packing_order(a, b));

    // End date of the last rental placed on each row
    let mut row_ends: Vec<NaiveDate> = Vec::new();
    let mut assignments = Vec::with_capacity(sorted.len());

    for interval in sorted {
        let row = match row_ends.iter().position(|end| *end < interval.start) {
            Some(row) => row,
            None => {
                row_ends.push(interval.end);
                row_ends.len() - 1
            }
        };
        row_ends[row] = interval.end;
        assignments.push(RowAssignment {
            interval: interval.clone(),
            row,
        });
    }

    PackedRows {
        assignments,
        row_count: row_ends.len(),
    }
}

/// Partition rentals by subject and pack each subject independently.
pub fn pack_by_subject(intervals: &[ClippedInterval]) -> BTreeMap<SubjectId, PackedRows> {
    let mut by_subject: BTreeMap<SubjectId, Vec<ClippedInterval>> = BTreeMap::new();
    for interval in intervals {
        by_subject
            .entry(interval.subject_id().clone())
            .or_default()
            .push(interval.clone());
    }

    by_subject
        .into_iter()
        .map(|(subject, intervals)| (subject, pack_rows(&intervals)))
        .collect()
}

/// Largest number of rentals open on any single day.
///
/// Brute force over every start date; this is the lower bound on rows that
/// [`pack_rows`] is expected to meet.
pub fn max_overlap(intervals: &[ClippedInterval]) -> usize {
    intervals
        .iter()
        .map(|candidate| {
            intervals
                .iter()
                .filter(|other| other.range().contains(candidate.start))
                .count()
        })
        .max()
        .unwrap_or(0)
}

/// Find the first pair of assignments of the same subject that share a row
/// and overlap. `None` means the no-overlap invariant holds.
pub fn find_row_conflict(assignments: &[RowAssignment]) -> Option<(&RowAssignment, &RowAssignment)> {
    assignments.iter().enumerate().find_map(|(i, a)| {
        assignments[i + 1..]
            .iter()
            .find(|b| {
                a.row == b.row
                    && a.interval.subject_id() == b.interval.subject_id()
                    && a.interval.overlaps(&b.interval)
            })
            .map(|b| (a, b))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::Interval;

    fn clipped(id: &str, subject: &str, start: (u32, u32), end: (u32, u32)) -> ClippedInterval {
        let start = NaiveDate::from_ymd_opt(2024, start.0, start.1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, end.0, end.1).unwrap();
        ClippedInterval {
            source: Interval::new(id, subject, start, end),
            start,
            end,
        }
    }

    fn rows_by_id(packed: &PackedRows) -> Vec<(String, usize)> {
        packed
            .assignments
            .iter()
            .map(|a| (a.interval.id().to_string(), a.row))
            .collect()
    }

    #[test]
    fn test_pack_empty() {
        let packed = pack_rows(&[]);
        assert!(packed.is_empty());
        assert_eq!(packed.row_count, 0);
    }

    #[test]
    fn test_reuses_first_free_row() {
        let intervals = vec![
            clipped("a", "X", (1, 1), (3, 31)),
            clipped("b", "X", (2, 1), (2, 20)),
            clipped("c", "X", (4, 1), (4, 30)),
        ];
        let packed = pack_rows(&intervals);
        assert_eq!(packed.row_count, 2);
        assert_eq!(
            rows_by_id(&packed),
            vec![("a".into(), 0), ("b".into(), 1), ("c".into(), 0)]
        );

        let first_row: Vec<&str> = packed.row(0).map(|a| a.interval.id()).collect();
        assert_eq!(first_row, vec!["a", "c"]);
        assert_eq!(packed.row(1).count(), 1);
        assert_eq!(packed.row(2).count(), 0);
    }

    #[test]
    fn test_touching_endpoints_use_separate_rows() {
        let intervals = vec![
            clipped("a", "Y", (1, 1), (1, 10)),
            clipped("b", "Y", (1, 10), (1, 20)),
        ];
        let packed = pack_rows(&intervals);
        assert_eq!(rows_by_id(&packed), vec![("a".into(), 0), ("b".into(), 1)]);
    }

    #[test]
    fn test_next_day_shares_row() {
        let intervals = vec![
            clipped("a", "Y", (1, 1), (1, 10)),
            clipped("b", "Y", (1, 11), (1, 20)),
        ];
        let packed = pack_rows(&intervals);
        assert_eq!(packed.row_count, 1);
    }

    #[test]
    fn test_ties_broken_by_end_then_id() {
        let intervals = vec![
            clipped("long", "X", (1, 1), (6, 30)),
            clipped("z-short", "X", (1, 1), (1, 31)),
            clipped("a-short", "X", (1, 1), (1, 31)),
        ];
        let packed = pack_rows(&intervals);
        assert_eq!(
            rows_by_id(&packed),
            vec![
                ("a-short".into(), 0),
                ("z-short".into(), 1),
                ("long".into(), 2)
            ]
        );
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut intervals = vec![
            clipped("a", "X", (1, 1), (3, 31)),
            clipped("b", "X", (2, 1), (2, 20)),
            clipped("c", "X", (4, 1), (4, 30)),
            clipped("d", "X", (3, 15), (5, 1)),
        ];
        let forward = pack_rows(&intervals);
        intervals.reverse();
        let backward = pack_rows(&intervals);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_pack_by_subject_never_mixes_subjects() {
        let intervals = vec![
            clipped("a", "X", (1, 1), (3, 31)),
            clipped("b", "Y", (1, 1), (3, 31)),
            clipped("c", "X", (2, 1), (2, 2)),
        ];
        let packed = pack_by_subject(&intervals);
        assert_eq!(packed.len(), 2);
        assert_eq!(packed[&SubjectId::from("X")].row_count, 2);
        assert_eq!(packed[&SubjectId::from("Y")].row_count, 1);
    }

    #[test]
    fn test_max_overlap_matches_row_count() {
        let intervals = vec![
            clipped("a", "X", (1, 1), (1, 31)),
            clipped("b", "X", (1, 15), (2, 15)),
            clipped("c", "X", (1, 20), (1, 25)),
            clipped("d", "X", (2, 1), (2, 28)),
        ];
        let packed = pack_rows(&intervals);
        assert_eq!(max_overlap(&intervals), 3);
        assert_eq!(packed.row_count, 3);
        assert!(find_row_conflict(&packed.assignments).is_none());
    }

    #[test]
    fn test_find_row_conflict_detects_overlap() {
        let a = RowAssignment {
            interval: clipped("a", "X", (1, 1), (1, 10)),
            row: 0,
        };
        let b = RowAssignment {
            interval: clipped("b", "X", (1, 10), (1, 20)),
            row: 0,
        };
        let assignments = vec![a, b];
        let conflict = find_row_conflict(&assignments).unwrap();
        assert_eq!(conflict.0.interval.id(), "a");
        assert_eq!(conflict.1.interval.id(), "b");
    }
}
