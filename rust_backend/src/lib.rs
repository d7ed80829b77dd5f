//! Rental occupancy timeline.
//!
//! Turns a set of dated rentals into a per-subject occupancy grid: rentals
//! are clipped to a window, optionally grouped, packed per subject into the
//! fewest rows such that no two rentals on a row overlap, and laid out as
//! fractional positions over month or day columns.
//!
//! # Modules
//!
//! - [`core`]: domain types and errors
//! - [`time`]: date parsing and calendar arithmetic
//! - [`algorithms`]: collector, grouping, row packer, layout emitter
//! - [`transformations`]: filters, search and pagination
//! - [`services`]: the full timeline pipeline
//! - [`db`]: rental repository seam and the in-memory implementation
//! - [`io`]: JSON rental loaders
//! - [`config`]: TOML configuration
//! - `http`: axum REST API (feature `http-server`)
//!
//! # Example
//!
//! ```
//! use occupancy_rust::core::Window;
//! use occupancy_rust::io::load_rentals_from_json_str;
//! use occupancy_rust::services::{compute_occupancy_timeline, TimelineQuery};
//!
//! let rentals = load_rentals_from_json_str(r#"[
//!     {"id": "1", "subject_id": "7", "start": "2024-01-10", "end": "2024-03-31"},
//!     {"id": "2", "subject_id": "7", "start": "2024-03-01", "end": "2024-04-15"}
//! ]"#).unwrap();
//!
//! let query = TimelineQuery::new(Window::calendar_year(2024).unwrap());
//! let timeline = compute_occupancy_timeline(&rentals, &query);
//! assert_eq!(timeline.total_subjects, 1);
//! assert_eq!(timeline.groups[0].subjects[0].row_count, 2);
//! ```

pub mod algorithms;
pub mod config;
pub mod core;
pub mod db;
pub mod io;
pub mod services;
pub mod time;
pub mod transformations;

#[cfg(feature = "http-server")]
pub mod http;
