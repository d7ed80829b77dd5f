//! Occupancy timeline: the full pipeline from raw rentals to a paginated,
//! grouped grid ready for rendering.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::algorithms::grouping::{compare_labels, partition, GroupBy};
use crate::algorithms::layout::{emit, unit_labels, Granularity, PlacedInterval};
use crate::algorithms::packer::pack_by_subject;
use crate::algorithms::collect;
use crate::core::domain::{Interval, SubjectInfo, Window};
use crate::core::error::TimelineResult;
use crate::db::repository::RentalRepository;
use crate::transformations::filtering::{
    distinct_sellers, distinct_statuses, filter_rentals, RentalFilter, SearchTerm,
};
use crate::transformations::pagination::{paginate, PageInfo, PageRequest};

/// Parameters of one timeline computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineQuery {
    pub window: Window,
    #[serde(default)]
    pub group_by: GroupBy,
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default)]
    pub filter: RentalFilter,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: PageRequest,
}

impl TimelineQuery {
    /// Ungrouped, monthly, unfiltered first page over `window`.
    pub fn new(window: Window) -> Self {
        Self {
            window,
            group_by: GroupBy::default(),
            granularity: Granularity::default(),
            filter: RentalFilter::default(),
            search: None,
            page: PageRequest::default(),
        }
    }

    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_filter(mut self, filter: RentalFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }
}

/// One subject row of the grid with its packed rentals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectTimeline {
    pub subject: SubjectInfo,
    /// Number of stacked rows the subject needs; equals the maximum number of
    /// simultaneously active rentals.
    pub row_count: usize,
    pub placements: Vec<PlacedInterval>,
}

/// A group section of the grid. `key` is `None` when not grouping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineGroup {
    pub key: Option<String>,
    pub subjects: Vec<SubjectTimeline>,
}

/// Result of a timeline computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyTimeline {
    pub window: Window,
    pub granularity: Granularity,
    pub unit_labels: Vec<String>,
    pub groups: Vec<TimelineGroup>,
    /// Distinct subjects after search, independent of grouping fan-out.
    pub total_subjects: usize,
    pub pagination: PageInfo,
    /// Filter options over every input rental.
    pub sellers: Vec<String>,
    pub statuses: Vec<String>,
}

impl OccupancyTimeline {
    /// SHA-256 hex digest of the JSON form.
    pub fn fingerprint(&self) -> TimelineResult<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }

    /// Subject rows across all groups on this page.
    pub fn subjects(&self) -> impl Iterator<Item = &SubjectTimeline> {
        self.groups.iter().flat_map(|g| g.subjects.iter())
    }
}

fn subject_order(a: &SubjectTimeline, b: &SubjectTimeline) -> Ordering {
    compare_labels(&a.subject.code, &b.subject.code).then_with(|| a.subject.id.cmp(&b.subject.id))
}

/// Compute the occupancy timeline for `intervals`.
///
/// Pipeline: filter by seller/status, clip to the window, partition into
/// groups, pack each subject of each group into rows, compute grid
/// coordinates, order subject rows by code, apply the search term, then
/// paginate the flattened `(group, subject)` rows and regroup them.
pub fn compute_occupancy_timeline(intervals: &[Interval], query: &TimelineQuery) -> OccupancyTimeline {
    let window = query.window;
    let granularity = query.granularity;

    let filtered = filter_rentals(intervals, &query.filter);
    let clipped = collect(&filtered, &window);
    let buckets = partition(clipped, query.group_by.extractor());
    let search = query.search.as_deref().and_then(SearchTerm::new);

    let mut entries: Vec<(Option<String>, SubjectTimeline)> = Vec::new();
    for bucket in buckets {
        let mut subjects: Vec<SubjectTimeline> = pack_by_subject(&bucket.intervals)
            .into_values()
            .filter_map(|rows| {
                let first = rows.assignments.first()?;
                let subject = SubjectInfo::from_interval(&first.interval.source);
                Some(SubjectTimeline {
                    subject,
                    row_count: rows.row_count,
                    placements: emit(&rows.assignments, &window, granularity),
                })
            })
            .collect();

        if let Some(term) = &search {
            subjects.retain(|s| {
                term.matches_subject(&s.subject, s.placements.iter().map(|p| &p.interval.source))
            });
        }
        subjects.sort_by(subject_order);

        entries.extend(subjects.into_iter().map(|s| (bucket.key.clone(), s)));
    }

    let total_subjects = entries
        .iter()
        .map(|(_, s)| &s.subject.id)
        .collect::<HashSet<_>>()
        .len();

    let page = paginate(entries, &query.page);

    let mut groups: Vec<TimelineGroup> = Vec::new();
    for (key, subject) in page.items {
        match groups.last_mut() {
            Some(group) if group.key == key => group.subjects.push(subject),
            _ => groups.push(TimelineGroup {
                key,
                subjects: vec![subject],
            }),
        }
    }

    log::debug!(
        "Timeline {}..{}: {} rentals in, {} subjects, page {}/{}",
        window.start(),
        window.end(),
        intervals.len(),
        total_subjects,
        page.info.page,
        page.info.total_pages
    );

    OccupancyTimeline {
        window,
        granularity,
        unit_labels: unit_labels(&window, granularity),
        groups,
        total_subjects,
        pagination: page.info,
        sellers: distinct_sellers(intervals),
        statuses: distinct_statuses(intervals),
    }
}

/// Rentals of `repo` that overlap the query window, unfiltered.
///
/// Filters are applied by the pipeline so the seller/status options stay
/// complete.
pub async fn fetch_timeline_rentals(
    repo: &dyn RentalRepository,
    query: &TimelineQuery,
) -> TimelineResult<Vec<Interval>> {
    Ok(repo
        .fetch_rentals(&query.window, &RentalFilter::default())
        .await?)
}

/// Fetch rentals overlapping the query window from `repo` and compute the
/// timeline.
pub async fn get_occupancy_timeline(
    repo: &dyn RentalRepository,
    query: &TimelineQuery,
) -> TimelineResult<OccupancyTimeline> {
    let rentals = fetch_timeline_rentals(repo, query).await?;
    Ok(compute_occupancy_timeline(&rentals, query))
}
