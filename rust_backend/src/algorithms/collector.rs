//! Interval collection: keep the rentals that touch a window and clamp them to it.

use crate::core::domain::{ClippedInterval, Interval, Window};

/// Clip rentals to `window`, dropping those that do not intersect it.
///
/// Malformed rentals (`start > end`) are not rejected: they are treated as the
/// single day `start` and reported as a data-quality warning. Output order
/// follows input order.
///
/// # Arguments
/// * `intervals` - Rentals from the data source
/// * `window` - Reporting period
///
/// # Returns
/// Clipped rentals satisfying `window.start <= start <= end <= window.end`
pub fn collect(intervals: &[Interval], window: &Window) -> Vec<ClippedInterval> {
    let mut clipped = Vec::with_capacity(intervals.len());
    let mut malformed = 0usize;

    for interval in intervals {
        if interval.is_malformed() {
            malformed += 1;
            log::warn!(
                "Rental {} on subject {} ends ({}) before it starts ({}); treating it as a single day",
                interval.id,
                interval.subject_id,
                interval.end,
                interval.start
            );
        }

        if let Some(range) = window.clip(&interval.range()) {
            clipped.push(ClippedInterval {
                source: interval.clone(),
                start: range.start,
                end: range.end,
            });
        }
    }

    log::debug!(
        "Collected {} of {} rentals inside {} ({} malformed)",
        clipped.len(),
        intervals.len(),
        window.range(),
        malformed
    );

    clipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn year_2024() -> Window {
        Window::calendar_year(2024).unwrap()
    }

    #[test]
    fn test_collect_empty() {
        assert!(collect(&[], &year_2024()).is_empty());
    }

    #[test]
    fn test_clip_start_before_window() {
        let rentals = vec![Interval::new("r1", "S1", d(2023, 12, 1), d(2024, 2, 15))];
        let clipped = collect(&rentals, &year_2024());
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped[0].start, d(2024, 1, 1));
        assert_eq!(clipped[0].end, d(2024, 2, 15));
        assert!(clipped[0].is_clipped());
        assert_eq!(clipped[0].source.start, d(2023, 12, 1));
    }

    #[test]
    fn test_clip_end_after_window() {
        let rentals = vec![Interval::new("r1", "S1", d(2024, 11, 1), d(2025, 3, 31))];
        let clipped = collect(&rentals, &year_2024());
        assert_eq!(clipped[0].start, d(2024, 11, 1));
        assert_eq!(clipped[0].end, d(2024, 12, 31));
    }

    #[test]
    fn test_rentals_outside_window_are_dropped() {
        let rentals = vec![
            Interval::new("before", "S1", d(2023, 1, 1), d(2023, 12, 31)),
            Interval::new("after", "S1", d(2025, 1, 1), d(2025, 1, 31)),
            Interval::new("edge", "S1", d(2023, 6, 1), d(2024, 1, 1)),
        ];
        let clipped = collect(&rentals, &year_2024());
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped[0].id(), "edge");
        assert_eq!(clipped[0].start, d(2024, 1, 1));
        assert_eq!(clipped[0].end, d(2024, 1, 1));
    }

    #[test]
    fn test_malformed_rental_becomes_single_day() {
        let rentals = vec![Interval::new("bad", "S1", d(2024, 3, 10), d(2024, 3, 1))];
        let clipped = collect(&rentals, &year_2024());
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped[0].start, d(2024, 3, 10));
        assert_eq!(clipped[0].end, d(2024, 3, 10));
    }

    #[test]
    fn test_malformed_rental_outside_window_is_dropped() {
        // Normalized to 2025-01-05 only, which misses the window
        let rentals = vec![Interval::new("bad", "S1", d(2025, 1, 5), d(2024, 6, 1))];
        assert!(collect(&rentals, &year_2024()).is_empty());
    }
}
