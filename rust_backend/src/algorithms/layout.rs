//! Layout emission: turn row assignments into proportional grid coordinates.
//!
//! The window is divided into equal units (calendar months or days). Each
//! assignment gets `left_fraction = start_unit / total_units` and
//! `width_fraction = duration_units / total_units`, both in `[0, 1]`. This
//! stage trusts the packer and does no overlap checking.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::domain::{ClippedInterval, RowAssignment, Window};
use crate::core::error::{TimelineError, TimelineResult};
use crate::time::calendar::{days_between, months_between};

/// Unit of the rendering grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One column per calendar month (12 for a calendar year).
    #[default]
    Month,
    /// One column per day.
    Day,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Month => "month",
            Granularity::Day => "day",
        }
    }

    /// Units between the window start and `date`.
    fn offset(&self, window_start: NaiveDate, date: NaiveDate) -> i64 {
        match self {
            Granularity::Month => months_between(window_start, date),
            Granularity::Day => days_between(window_start, date),
        }
    }

    /// Number of grid columns covering `window`.
    pub fn total_units(&self, window: &Window) -> i64 {
        self.offset(window.start(), window.end()) + 1
    }

    /// Largest grid a request may ask for: ten years of months, or a leap
    /// year of days.
    pub fn max_units(&self) -> i64 {
        match self {
            Granularity::Month => 120,
            Granularity::Day => 366,
        }
    }

    /// Reject windows whose grid would exceed [`Granularity::max_units`].
    pub fn check_window(&self, window: &Window) -> TimelineResult<()> {
        let units = self.total_units(window);
        let max = self.max_units();
        if units > max {
            return Err(TimelineError::WindowTooLarge {
                units,
                max,
                granularity: self.as_str(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "month" | "months" => Ok(Granularity::Month),
            "day" | "days" => Ok(Granularity::Day),
            other => Err(TimelineError::InvalidGranularity(other.to_string())),
        }
    }
}

/// A packed rental with its position on the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedInterval {
    pub interval: ClippedInterval,
    pub row: usize,
    /// Zero-based column of the clipped start.
    pub start_unit: i64,
    /// Columns covered, counting both ends.
    pub duration_units: i64,
    pub left_fraction: f64,
    pub width_fraction: f64,
}

/// Compute grid coordinates for every assignment.
///
/// # Arguments
/// * `assignments` - Row assignments of rentals already clipped to `window`
/// * `window` - The window the rentals were clipped against
/// * `granularity` - Grid unit
pub fn emit(
    assignments: &[RowAssignment],
    window: &Window,
    granularity: Granularity,
) -> Vec<PlacedInterval> {
    let total_units = granularity.total_units(window);
    let last_unit = total_units - 1;
    let total = total_units as f64;

    assignments
        .iter()
        .map(|assignment| {
            let interval = &assignment.interval;
            let start_unit = granularity
                .offset(window.start(), interval.start)
                .clamp(0, last_unit);
            let end_unit = granularity
                .offset(window.start(), interval.end)
                .clamp(start_unit, last_unit);
            let duration_units = end_unit - start_unit + 1;

            PlacedInterval {
                interval: interval.clone(),
                row: assignment.row,
                start_unit,
                duration_units,
                left_fraction: start_unit as f64 / total,
                width_fraction: duration_units as f64 / total,
            }
        })
        .collect()
}

/// Column labels for the grid header: `YYYY-MM` per month or `YYYY-MM-DD` per day.
pub fn unit_labels(window: &Window, granularity: Granularity) -> Vec<String> {
    match granularity {
        Granularity::Month => {
            let mut labels = Vec::new();
            let mut cursor = window.start().with_day0(0);
            while let Some(month) = cursor {
                if month > window.end() {
                    break;
                }
                labels.push(month.format("%Y-%m").to_string());
                cursor = month.checked_add_months(Months::new(1));
            }
            labels
        }
        Granularity::Day => window
            .start()
            .iter_days()
            .take_while(|day| *day <= window.end())
            .map(|day| day.format("%Y-%m-%d").to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::Interval;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn assignment(start: NaiveDate, end: NaiveDate, row: usize) -> RowAssignment {
        RowAssignment {
            interval: ClippedInterval {
                source: Interval::new("r", "S", start, end),
                start,
                end,
            },
            row,
        }
    }

    #[test]
    fn test_check_window_limits() {
        let leap_year = Window::calendar_year(2024).unwrap();
        assert!(Granularity::Day.check_window(&leap_year).is_ok());

        let two_years = Window::new(d(2024, 1, 1), d(2025, 12, 31)).unwrap();
        let err = Granularity::Day.check_window(&two_years).unwrap_err();
        assert!(matches!(
            err,
            TimelineError::WindowTooLarge { units: 731, max: 366, .. }
        ));
        assert!(Granularity::Month.check_window(&two_years).is_ok());

        let ages = Window::new(d(1, 1, 1), d(9999, 12, 31)).unwrap();
        assert!(Granularity::Month.check_window(&ages).is_err());
    }

    #[test]
    fn test_month_grid_for_calendar_year() {
        let window = Window::calendar_year(2024).unwrap();
        assert_eq!(Granularity::Month.total_units(&window), 12);

        let placed = emit(
            &[assignment(d(2024, 2, 10), d(2024, 4, 2), 1)],
            &window,
            Granularity::Month,
        );
        assert_eq!(placed[0].row, 1);
        assert_eq!(placed[0].start_unit, 1);
        assert_eq!(placed[0].duration_units, 3);
        assert!((placed[0].left_fraction - 1.0 / 12.0).abs() < 1e-12);
        assert!((placed[0].width_fraction - 3.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_year_spans_whole_width() {
        let window = Window::calendar_year(2024).unwrap();
        let placed = emit(
            &[assignment(d(2024, 1, 1), d(2024, 12, 31), 0)],
            &window,
            Granularity::Month,
        );
        assert_eq!(placed[0].left_fraction, 0.0);
        assert_eq!(placed[0].width_fraction, 1.0);
    }

    #[test]
    fn test_day_grid() {
        let window = Window::new(d(2024, 1, 1), d(2024, 1, 10)).unwrap();
        assert_eq!(Granularity::Day.total_units(&window), 10);
        let placed = emit(
            &[assignment(d(2024, 1, 3), d(2024, 1, 4), 0)],
            &window,
            Granularity::Day,
        );
        assert_eq!(placed[0].start_unit, 2);
        assert_eq!(placed[0].duration_units, 2);
        assert!((placed[0].left_fraction - 0.2).abs() < 1e-12);
        assert!((placed[0].width_fraction - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_window_not_aligned_to_months() {
        let window = Window::new(d(2024, 11, 15), d(2025, 2, 10)).unwrap();
        assert_eq!(Granularity::Month.total_units(&window), 4);
        assert_eq!(
            unit_labels(&window, Granularity::Month),
            vec!["2024-11", "2024-12", "2025-01", "2025-02"]
        );
    }

    #[test]
    fn test_unit_labels_day() {
        let window = Window::new(d(2024, 2, 28), d(2024, 3, 1)).unwrap();
        assert_eq!(
            unit_labels(&window, Granularity::Day),
            vec!["2024-02-28", "2024-02-29", "2024-03-01"]
        );
    }

    #[test]
    fn test_granularity_from_str() {
        assert_eq!("MONTH".parse::<Granularity>().unwrap(), Granularity::Month);
        assert_eq!("days".parse::<Granularity>().unwrap(), Granularity::Day);
        assert!("week".parse::<Granularity>().is_err());
    }
}
