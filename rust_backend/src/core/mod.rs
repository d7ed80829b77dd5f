//! Core domain models for rental occupancy timelines.
//!
//! This module defines the fundamental data structures used throughout the crate,
//! representing rentals, reporting windows, clipped intervals and row assignments,
//! together with the crate-wide error type.

pub mod domain;
pub mod error;

pub use domain::{
    ClippedInterval, DateRange, Interval, RentalDetails, RowAssignment, SubjectId, SubjectInfo,
    Window,
};
pub use error::{TimelineError, TimelineResult};
