//! Grouping of clipped rentals into named buckets before packing.
//!
//! A rental whose key extractor yields several distinct keys is replicated into
//! each of those buckets (fan-out). Buckets are packed independently, so the
//! same subject may appear in several buckets with a different subset of its
//! rentals.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::core::domain::ClippedInterval;
use crate::core::error::TimelineError;

/// Bucket for rentals whose extractor produced no key.
pub const UNGROUPED_KEY: &str = "Ungrouped";

pub const NO_CLIENT: &str = "No client";
pub const NO_SELLER: &str = "No seller";
pub const NO_STATUS: &str = "No status";
pub const NO_CITY: &str = "No city";

/// Produces the group keys of a rental.
pub trait GroupKeyExtractor {
    fn keys(&self, interval: &ClippedInterval) -> Vec<String>;
}

impl<F> GroupKeyExtractor for F
where
    F: Fn(&ClippedInterval) -> Vec<String>,
{
    fn keys(&self, interval: &ClippedInterval) -> Vec<String> {
        self(interval)
    }
}

/// Built-in grouping criteria offered by the planning view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    #[default]
    None,
    Client,
    Seller,
    Status,
    /// Groups by the subject's city; every rental of the subject follows it.
    City,
    /// Uses the rental's own `group_keys`.
    Explicit,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::None => "none",
            GroupBy::Client => "client",
            GroupBy::Seller => "seller",
            GroupBy::Status => "status",
            GroupBy::City => "city",
            GroupBy::Explicit => "explicit",
        }
    }

    /// The extractor to hand to [`partition`], or `None` when grouping is off.
    pub fn extractor(&self) -> Option<&dyn GroupKeyExtractor> {
        match self {
            GroupBy::None => None,
            other => Some(other as &dyn GroupKeyExtractor),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(GroupBy::None),
            "client" => Ok(GroupBy::Client),
            "seller" => Ok(GroupBy::Seller),
            "status" => Ok(GroupBy::Status),
            "city" => Ok(GroupBy::City),
            "explicit" => Ok(GroupBy::Explicit),
            other => Err(TimelineError::InvalidGroupBy(other.to_string())),
        }
    }
}

fn value_or(value: &Option<String>, fallback: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

impl GroupKeyExtractor for GroupBy {
    fn keys(&self, interval: &ClippedInterval) -> Vec<String> {
        let details = &interval.source.details;
        match self {
            GroupBy::None => Vec::new(),
            GroupBy::Client => vec![value_or(&details.client, NO_CLIENT)],
            GroupBy::Seller => vec![value_or(&details.seller, NO_SELLER)],
            GroupBy::Status => vec![value_or(&details.status, NO_STATUS)],
            GroupBy::City => vec![value_or(&details.subject_city, NO_CITY)],
            GroupBy::Explicit => interval.source.group_keys.clone(),
        }
    }
}

/// Rentals sharing a group key. `key` is `None` when grouping is disabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupBucket {
    pub key: Option<String>,
    pub intervals: Vec<ClippedInterval>,
}

/// Case-insensitive ordering with an exact tie-break, so the order is total.
pub(crate) fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

fn bucket_order(a: &ClippedInterval, b: &ClippedInterval) -> Ordering {
    a.subject_id()
        .cmp(b.subject_id())
        .then(a.start.cmp(&b.start))
        .then(a.end.cmp(&b.end))
        .then_with(|| a.id().cmp(b.id()))
}

/// Partition rentals into buckets.
///
/// With no extractor a single implicit bucket holds every rental. Rentals in
/// each bucket are sorted by subject, start, end and rental id; buckets are
/// sorted by key.
pub fn partition(
    intervals: Vec<ClippedInterval>,
    extractor: Option<&dyn GroupKeyExtractor>,
) -> Vec<GroupBucket> {
    let Some(extractor) = extractor else {
        let mut intervals = intervals;
        intervals.sort_by(bucket_order);
        return vec![GroupBucket {
            key: None,
            intervals,
        }];
    };

    let mut buckets: BTreeMap<String, Vec<ClippedInterval>> = BTreeMap::new();
    for interval in intervals {
        let mut keys: BTreeSet<String> = extractor.keys(&interval).into_iter().collect();
        if keys.is_empty() {
            keys.insert(UNGROUPED_KEY.to_string());
        }
        for key in keys {
            buckets.entry(key).or_default().push(interval.clone());
        }
    }

    let mut grouped: Vec<GroupBucket> = buckets
        .into_iter()
        .map(|(key, mut intervals)| {
            intervals.sort_by(bucket_order);
            GroupBucket {
                key: Some(key),
                intervals,
            }
        })
        .collect();
    grouped.sort_by(|a, b| {
        compare_labels(
            a.key.as_deref().unwrap_or_default(),
            b.key.as_deref().unwrap_or_default(),
        )
    });
    grouped
}
