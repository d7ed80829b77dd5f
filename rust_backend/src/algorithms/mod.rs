//! Timeline algorithms.
//!
//! The occupancy timeline is built in four independent stages connected by
//! plain data:
//!
//! - [`collector`]: keep rentals that touch the window and clip them to it
//! - [`grouping`]: optional partition into named buckets (fan-out per key)
//! - [`packer`]: per-subject greedy row assignment with no overlaps per row
//! - [`layout`]: row assignments to proportional grid coordinates
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use occupancy_rust::algorithms::{collect, emit, pack_by_subject, Granularity};
//! use occupancy_rust::core::{Interval, Window};
//!
//! let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
//! let rentals = vec![
//!     Interval::new("r1", "VLL-01", d(1, 1), d(3, 31)),
//!     Interval::new("r2", "VLL-01", d(2, 1), d(2, 20)),
//! ];
//! let window = Window::calendar_year(2024).unwrap();
//!
//! let clipped = collect(&rentals, &window);
//! let packed = pack_by_subject(&clipped);
//! let rows = &packed.values().next().unwrap();
//! assert_eq!(rows.row_count, 2);
//!
//! let placed = emit(&rows.assignments, &window, Granularity::Month);
//! assert_eq!(placed[1].row, 1);
//! ```

pub mod collector;
pub mod grouping;
pub mod layout;
pub mod packer;

pub use collector::collect;
pub use grouping::{partition, GroupBucket, GroupBy, GroupKeyExtractor, UNGROUPED_KEY};
pub use layout::{emit, unit_labels, Granularity, PlacedInterval};
pub use packer::{find_row_conflict, max_overlap, pack_by_subject, pack_rows, PackedRows};
