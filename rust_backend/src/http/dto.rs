//! Data Transfer Objects for the HTTP API.
//!
//! Timeline responses serialize [`OccupancyTimeline`] directly; the types
//! here cover request parameters and the small bookkeeping responses.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithms::grouping::GroupBy;
use crate::algorithms::layout::Granularity;
use crate::config::TimelineSettings;
use crate::core::domain::Window;
use crate::core::error::{TimelineError, TimelineResult};
use crate::io::loaders::RentalRecord;
use crate::services::timeline::TimelineQuery;
use crate::time::calendar::parse_utc_date;
use crate::transformations::filtering::RentalFilter;
use crate::transformations::pagination::PageRequest;

pub use crate::services::timeline::OccupancyTimeline;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `connected`, `disconnected` or the repository error
    pub repository: String,
    /// Stored rentals, when the repository is reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rentals: Option<usize>,
}

/// Response for `POST /v1/rentals`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreRentalsResponse {
    /// Rentals written by this request
    pub stored: usize,
    /// Rentals in the repository afterwards
    pub total: usize,
}

/// Timeline parameters, shared by the query string of `GET /v1/timeline`
/// and the body of `POST /v1/timeline/compute`.
///
/// The window is `start`..`end` when both are given, otherwise the calendar
/// `year` (current UTC year by default).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineParams {
    pub year: Option<i32>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub group_by: Option<String>,
    pub granularity: Option<String>,
    pub seller: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl TimelineParams {
    fn window(&self) -> TimelineResult<Window> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => Window::new(parse_utc_date(start)?, parse_utc_date(end)?),
            (None, None) => Window::calendar_year(self.year.unwrap_or_else(|| Utc::now().year())),
            (Some(value), None) | (None, Some(value)) => Err(TimelineError::InvalidDate {
                value: value.clone(),
                reason: "start and end must be given together".to_string(),
            }),
        }
    }

    /// Validate the parameters into a query, filling gaps from `defaults`.
    pub fn into_query(self, defaults: &TimelineSettings) -> TimelineResult<TimelineQuery> {
        let window = self.window()?;
        let group_by = match self.group_by.as_deref() {
            Some(value) => value.parse::<GroupBy>()?,
            None => defaults.group_by,
        };
        let granularity = match self.granularity.as_deref() {
            Some(value) => value.parse::<Granularity>()?,
            None => defaults.granularity,
        };
        granularity.check_window(&window)?;
        let page = PageRequest::new(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(defaults.page_size),
        );

        let mut query = TimelineQuery::new(window)
            .with_group_by(group_by)
            .with_granularity(granularity)
            .with_filter(RentalFilter::new(self.seller, self.status))
            .with_page(page);
        query.search = self.search;
        Ok(query)
    }
}

/// Body of `POST /v1/timeline/compute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeTimelineRequest {
    pub rentals: Vec<RentalRecord>,
    #[serde(flatten)]
    pub params: TimelineParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_explicit_range_and_overrides() {
        let params = TimelineParams {
            start: Some("2024-03-01".into()),
            end: Some("2024-03-31".into()),
            group_by: Some("status".into()),
            granularity: Some("day".into()),
            seller: Some("all".into()),
            page: Some(0),
            ..Default::default()
        };
        let query = params.into_query(&TimelineSettings::default()).unwrap();

        assert_eq!(query.window.start(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(query.group_by, GroupBy::Status);
        assert_eq!(query.granularity, Granularity::Day);
        assert!(query.filter.is_empty());
        assert_eq!(query.page.page, 1);
        assert_eq!(query.page.page_size, 100);
    }

    #[test]
    fn test_year_window() {
        let params = TimelineParams {
            year: Some(2023),
            ..Default::default()
        };
        let query = params.into_query(&TimelineSettings::default()).unwrap();
        assert_eq!(query.window.end(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn test_half_open_range_rejected() {
        let params = TimelineParams {
            start: Some("2024-01-01".into()),
            ..Default::default()
        };
        assert!(params.into_query(&TimelineSettings::default()).is_err());
    }

    #[test]
    fn test_oversized_day_window_rejected() {
        let params = TimelineParams {
            start: Some("0001-01-01".into()),
            end: Some("9999-12-31".into()),
            granularity: Some("day".into()),
            ..Default::default()
        };
        let err = params.into_query(&TimelineSettings::default()).unwrap_err();
        assert!(matches!(err, TimelineError::WindowTooLarge { max: 366, .. }));
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_unknown_group_by_rejected() {
        let params = TimelineParams {
            year: Some(2024),
            group_by: Some("planet".into()),
            ..Default::default()
        };
        let err = params.into_query(&TimelineSettings::default()).unwrap_err();
        assert!(matches!(err, TimelineError::InvalidGroupBy(_)));
    }
}
