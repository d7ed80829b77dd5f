//! Rental storage.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  services::timeline / http handlers         │
//! └───────────────────┬─────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────┐
//! │  RentalRepository (repository.rs)           │
//! └───────────────────┬─────────────────────────┘
//!                     │
//!           ┌─────────▼─────────┐
//!           │ LocalRepository   │
//!           │ (in-memory)       │
//!           └───────────────────┘
//! ```

pub mod repositories;
pub mod repository;

pub use repositories::LocalRepository;
pub use repository::{RentalRepository, RepositoryError, RepositoryResult};
