//! Rental data loading.
//!
//! # Example
//!
//! ```
//! use occupancy_rust::io::load_rentals_from_json_str;
//!
//! let rentals = load_rentals_from_json_str(
//!     r#"[{"id": "1", "subject_id": "7", "start": "2024-01-01", "end": "2024-02-29"}]"#,
//! ).unwrap();
//! assert_eq!(rentals.len(), 1);
//! ```

pub mod loaders;


pub use loaders::{
    load_rentals_from_json_file, load_rentals_from_json_str, records_to_intervals, RentalRecord,
};
