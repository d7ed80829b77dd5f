use chrono::NaiveDate;

use crate::core::error::TimelineError;
use crate::time::calendar::{days_between, month_index, months_between, parse_utc_date};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_parse_plain_date() {
    assert_eq!(parse_utc_date("2024-01-31").unwrap(), d(2024, 1, 31));
    assert_eq!(parse_utc_date("  2024-01-31 ").unwrap(), d(2024, 1, 31));
}

#[test]
fn test_parse_naive_timestamp_as_utc() {
    assert_eq!(parse_utc_date("2024-12-31T23:59:59").unwrap(), d(2024, 12, 31));
    assert_eq!(parse_utc_date("2024-06-01 00:00:00").unwrap(), d(2024, 6, 1));
    assert_eq!(
        parse_utc_date("2024-06-01T08:30:00.250").unwrap(),
        d(2024, 6, 1)
    );
}

#[test]
fn test_parse_rfc3339_converts_to_utc() {
    assert_eq!(parse_utc_date("2024-01-01T00:00:00Z").unwrap(), d(2024, 1, 1));
    // 23:30 at -04:00 is already the next day in UTC
    assert_eq!(
        parse_utc_date("2024-12-31T23:30:00-04:00").unwrap(),
        d(2025, 1, 1)
    );
}

#[test]
fn test_parse_rejects_garbage() {
    let err = parse_utc_date("31/01/2024").unwrap_err();
    assert!(matches!(err, TimelineError::InvalidDate { .. }));
    assert!(parse_utc_date("").is_err());
    assert!(parse_utc_date("2024-02-30").is_err());
}

#[test]
fn test_month_arithmetic_across_years() {
    assert_eq!(months_between(d(2024, 1, 31), d(2024, 1, 1)), 0);
    assert_eq!(months_between(d(2024, 1, 1), d(2024, 12, 31)), 11);
    assert_eq!(months_between(d(2023, 12, 1), d(2024, 2, 15)), 2);
    assert_eq!(months_between(d(2024, 3, 1), d(2024, 1, 1)), -2);
    assert_eq!(month_index(d(2024, 1, 1)) - month_index(d(2023, 1, 1)), 12);
}

#[test]
fn test_days_between() {
    assert_eq!(days_between(d(2024, 1, 1), d(2024, 12, 31)), 365);
    assert_eq!(days_between(d(2024, 1, 10), d(2024, 1, 1)), -9);
}
