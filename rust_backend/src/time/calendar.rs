use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::core::error::{TimelineError, TimelineResult};

/// Parse a date string into a UTC calendar day.
///
/// Accepted forms:
/// * `2024-03-01`
/// * `2024-03-01T10:00:00` or `2024-03-01 10:00:00` (naive, read as UTC)
/// * RFC 3339 with an offset, e.g. `2024-03-01T01:00:00+02:00` (converted to UTC)
///
/// # Example
/// ```
/// use occupancy_rust::time::parse_utc_date;
///
/// let day = parse_utc_date("2024-03-01T01:00:00+02:00").unwrap();
/// assert_eq!(day.to_string(), "2024-02-29");
/// ```
pub fn parse_utc_date(value: &str) -> TimelineResult<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TimelineError::InvalidDate {
            value: value.to_string(),
            reason: "empty date".to_string(),
        });
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt.date());
        }
    }

    Err(TimelineError::InvalidDate {
        value: value.to_string(),
        reason: "expected YYYY-MM-DD or an RFC 3339 timestamp".to_string(),
    })
}

/// Absolute month number (`year * 12 + month0`), comparable across years.
pub fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Calendar months from `from` to `to`, ignoring the day of month.
/// Negative when `to` falls in an earlier month.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    month_index(to) - month_index(from)
}

/// Days from `from` to `to`. Negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
