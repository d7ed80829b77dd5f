//! Calendar arithmetic and UTC date parsing.

pub mod calendar;

#[cfg(test)]
mod calendar_tests;

pub use calendar::{days_between, month_index, months_between, parse_utc_date};
