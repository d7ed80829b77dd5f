//! Rental filtering and result pagination.
//!
//! # Modules
//!
//! - [`filtering`]: seller/status filters, free-text search, filter options
//! - [`pagination`]: 1-based pages over subject rows
//!
//! # Example
//!
//! ```
//! use occupancy_rust::transformations::{filter_rentals, RentalFilter};
//!
//! let filter = RentalFilter::new(Some("all".to_string()), Some("active".to_string()));
//! assert!(filter.seller.is_none());
//! assert!(filter_rentals(&[], &filter).is_empty());
//! ```

pub mod filtering;
pub mod pagination;

pub use filtering::{
    distinct_sellers, distinct_statuses, filter_rentals, RentalFilter, SearchTerm,
};
pub use pagination::{paginate, Page, PageInfo, PageRequest, DEFAULT_PAGE_SIZE};
