//! Domain models for rentals, reporting windows and row assignments.
//!
//! All dates are UTC calendar days (`chrono::NaiveDate`) and every range is
//! inclusive at both ends: a rental running `[Jan 1, Jan 10]` occupies its
//! asset on January 10 as well. Two ranges overlap when
//! `a.start <= b.end && b.start <= a.end`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{TimelineError, TimelineResult};

/// Strongly-typed identifier for the physical asset (support) being scheduled.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SubjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An inclusive range of UTC calendar days.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use occupancy_rust::core::DateRange;
///
/// let d = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
/// let first = DateRange::new(d(1, 1), d(1, 10)).unwrap();
/// let second = DateRange::new(d(1, 10), d(1, 20)).unwrap();
///
/// // Inclusive end dates: sharing the boundary day is an overlap.
/// assert!(first.overlaps(&second));
/// assert_eq!(first.duration_days(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, returning `None` when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// A range covering exactly one day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of days covered, counting both endpoints.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The overlapping part of two ranges, if any.
    pub fn intersection(&self, other: &DateRange) -> Option<DateRange> {
        DateRange::new(self.start.max(other.start), self.end.min(other.end))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.start, self.end)
    }
}

/// Display metadata carried by a rental. None of it participates in packing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RentalDetails {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub quote_id: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    /// Contracted months, as agreed on the quote.
    #[serde(default)]
    pub months: Option<u32>,
    #[serde(default)]
    pub subject_code: Option<String>,
    #[serde(default)]
    pub subject_title: Option<String>,
    #[serde(default)]
    pub subject_city: Option<String>,
}

/// A rental of one asset over an inclusive date range.
///
/// `start > end` is tolerated: such a rental is treated as the single day
/// `start` wherever its range is needed (see [`Interval::range`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub id: String,
    pub subject_id: SubjectId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Opaque display label (counterparty name by default).
    #[serde(default)]
    pub label: String,
    /// Explicit group keys; empty when the rental carries none.
    #[serde(default)]
    pub group_keys: Vec<String>,
    #[serde(default)]
    pub details: RentalDetails,
}

impl Interval {
    pub fn new(
        id: impl Into<String>,
        subject_id: impl Into<SubjectId>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            subject_id: subject_id.into(),
            start,
            end,
            label: String::new(),
            group_keys: Vec::new(),
            details: RentalDetails::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_group_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_details(mut self, details: RentalDetails) -> Self {
        self.details = details;
        self
    }

    /// Returns `true` if the rental ends before it starts.
    pub fn is_malformed(&self) -> bool {
        self.start > self.end
    }

    /// The normalized range: `[start, end]`, or `[start, start]` when malformed.
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start, self.end).unwrap_or_else(|| DateRange::single_day(self.start))
    }
}

/// The reporting period rentals are clipped against.
///
/// Always satisfies `start <= end`; construction fails fast otherwise.
///
/// # Examples
///
/// ```
/// use occupancy_rust::core::Window;
///
/// let year = Window::calendar_year(2024).unwrap();
/// assert_eq!(year.start().to_string(), "2024-01-01");
/// assert_eq!(year.end().to_string(), "2024-12-31");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowRepr", into = "WindowRepr")]
pub struct Window {
    range: DateRange,
}

#[derive(Serialize, Deserialize)]
struct WindowRepr {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<WindowRepr> for Window {
    type Error = TimelineError;

    fn try_from(repr: WindowRepr) -> Result<Self, Self::Error> {
        Window::new(repr.start, repr.end)
    }
}

impl From<Window> for WindowRepr {
    fn from(window: Window) -> Self {
        Self {
            start: window.start(),
            end: window.end(),
        }
    }
}

impl Window {
    pub fn new(start: NaiveDate, end: NaiveDate) -> TimelineResult<Self> {
        DateRange::new(start, end)
            .map(|range| Self { range })
            .ok_or(TimelineError::InvalidWindow { start, end })
    }

    /// January 1 through December 31 of `year`.
    pub fn calendar_year(year: i32) -> TimelineResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(TimelineError::InvalidYear(year))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(TimelineError::InvalidYear(year))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.range.start
    }

    pub fn end(&self) -> NaiveDate {
        self.range.end
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn overlaps(&self, range: &DateRange) -> bool {
        self.range.overlaps(range)
    }

    /// Clamps `range` to the window, or `None` when they do not intersect.
    pub fn clip(&self, range: &DateRange) -> Option<DateRange> {
        self.range.intersection(range)
    }
}

/// A rental whose dates have been clamped to a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClippedInterval {
    /// The rental as supplied by the data source.
    pub source: Interval,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ClippedInterval {
    pub fn id(&self) -> &str {
        &self.source.id
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.source.subject_id
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }

    pub fn overlaps(&self, other: &ClippedInterval) -> bool {
        self.range().overlaps(&other.range())
    }

    /// Returns `true` if the window cut off part of the rental.
    pub fn is_clipped(&self) -> bool {
        self.source.range() != self.range()
    }
}

/// A clipped rental placed on a row of its subject's lane stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowAssignment {
    pub interval: ClippedInterval,
    pub row: usize,
}

/// Display record of a subject, derived from its rentals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectInfo {
    pub id: SubjectId,
    pub code: String,
    pub title: String,
    pub city: Option<String>,
}

impl SubjectInfo {
    /// Builds the subject record from one of its rentals, falling back to
    /// `SUP-<id>` for a missing code and `Untitled` for a missing title.
    pub fn from_interval(interval: &Interval) -> Self {
        let details = &interval.details;
        Self {
            id: interval.subject_id.clone(),
            code: details
                .subject_code
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| format!("SUP-{}", interval.subject_id)),
            title: details
                .subject_title
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Untitled".to_string()),
            city: details.subject_city.clone(),
        }
    }
}
