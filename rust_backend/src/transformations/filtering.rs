use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::domain::{Interval, SubjectInfo};

/// Value meaning "no filter" in filter dropdowns.
pub const ALL: &str = "all";

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
}

/// Exact-match filters applied to rentals before they are collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalFilter {
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl RentalFilter {
    /// Build a filter; empty values and `all` disable the corresponding criterion.
    pub fn new(seller: Option<String>, status: Option<String>) -> Self {
        Self {
            seller: normalize(seller),
            status: normalize(status),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.seller.is_none() && self.status.is_none()
    }

    pub fn matches(&self, interval: &Interval) -> bool {
        let details = &interval.details;
        let seller_ok = self
            .seller
            .as_deref()
            .map_or(true, |s| details.seller.as_deref().map(str::trim) == Some(s));
        let status_ok = self
            .status
            .as_deref()
            .map_or(true, |s| details.status.as_deref().map(str::trim) == Some(s));
        seller_ok && status_ok
    }
}

/// Filter rentals by seller and status
pub fn filter_rentals(intervals: &[Interval], filter: &RentalFilter) -> Vec<Interval> {
    if filter.is_empty() {
        return intervals.to_vec();
    }
    intervals
        .iter()
        .filter(|interval| filter.matches(interval))
        .cloned()
        .collect()
}

/// Case-insensitive free-text search over a subject row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Returns `None` for a blank term, which matches everything.
    pub fn new(term: &str) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            None
        } else {
            Some(Self(term.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn hit(&self, value: Option<&str>) -> bool {
        value.is_some_and(|v| v.to_lowercase().contains(&self.0))
    }

    /// A subject row matches on its code or title, or on the client, seller,
    /// rental code or subject code of any rental shown in the row.
    pub fn matches_subject<'a, I>(&self, subject: &SubjectInfo, rentals: I) -> bool
    where
        I: IntoIterator<Item = &'a Interval>,
    {
        if self.hit(Some(&subject.code)) || self.hit(Some(&subject.title)) {
            return true;
        }
        rentals.into_iter().any(|rental| {
            let details = &rental.details;
            self.hit(details.client.as_deref())
                || self.hit(details.seller.as_deref())
                || self.hit(details.code.as_deref())
                || self.hit(details.subject_code.as_deref())
        })
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .flatten()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted distinct sellers, for filter options
pub fn distinct_sellers(intervals: &[Interval]) -> Vec<String> {
    distinct(intervals.iter().map(|i| i.details.seller.as_deref()))
}

/// Sorted distinct statuses, for filter options
pub fn distinct_statuses(intervals: &[Interval]) -> Vec<String> {
    distinct(intervals.iter().map(|i| i.details.status.as_deref()))
}
