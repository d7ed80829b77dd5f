//! Service layer for business logic and orchestration.
//!
//! Services sit between the repository and the HTTP surface: they fetch
//! rentals and run them through the algorithms.

pub mod timeline;

pub use timeline::{
    compute_occupancy_timeline, fetch_timeline_rentals, get_occupancy_timeline,
    OccupancyTimeline, SubjectTimeline, TimelineGroup, TimelineQuery,
};
