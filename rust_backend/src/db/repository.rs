//! Repository trait for abstracting rental storage.
//!
//! The timeline service only talks to storage through [`RentalRepository`],
//! so the in-memory implementation and any persistent backend can be
//! swapped via dependency injection.

use async_trait::async_trait;

use crate::core::domain::{Interval, Window};
use crate::transformations::filtering::RentalFilter;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Data validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Storage for rental intervals.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a single repository can be shared
/// across request handlers.
#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Check if the backing store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Insert or replace rentals, keyed by rental id.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rentals written
    /// * `Err(RepositoryError::ValidationError)` - If a rental has an empty id
    async fn store_rentals(&self, rentals: Vec<Interval>) -> RepositoryResult<usize>;

    /// Get a single rental by id.
    ///
    /// # Returns
    /// * `Ok(Interval)` - The stored rental
    /// * `Err(RepositoryError::NotFound)` - If no rental has that id
    async fn get_rental(&self, id: &str) -> RepositoryResult<Interval>;

    /// Fetch rentals that overlap `window` and pass `filter`, in insertion order.
    ///
    /// Malformed rentals are matched on their normalized single-day range.
    async fn fetch_rentals(
        &self,
        window: &Window,
        filter: &RentalFilter,
    ) -> RepositoryResult<Vec<Interval>>;

    /// Total number of stored rentals.
    async fn rental_count(&self) -> RepositoryResult<usize>;
}
