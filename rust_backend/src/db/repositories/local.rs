//! In-memory local repository implementation.
//!
//! Suitable for unit testing, local development and the default server
//! setup seeded from a JSON file.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::domain::{Interval, Window};
use crate::db::repository::*;
use crate::transformations::filtering::RentalFilter;

/// In-memory local repository.
///
/// # Example
/// ```
/// use occupancy_rust::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.len(), 0);
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    rentals: Vec<Interval>,
    index: HashMap<String, usize>,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            rentals: Vec::new(),
            index: HashMap::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `rentals`.
    pub fn with_rentals(rentals: Vec<Interval>) -> RepositoryResult<Self> {
        let repo = Self::new();
        repo.upsert(rentals)?;
        Ok(repo)
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, LocalData>> {
        self.data
            .read()
            .map_err(|e| RepositoryError::InternalError(format!("lock poisoned: {}", e)))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, LocalData>> {
        self.data
            .write()
            .map_err(|e| RepositoryError::InternalError(format!("lock poisoned: {}", e)))
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        if let Ok(mut data) = self.data.write() {
            data.is_healthy = healthy;
        }
    }

    /// Clear all rentals, keeping the health flag.
    pub fn clear(&self) {
        if let Ok(mut data) = self.data.write() {
            data.rentals.clear();
            data.index.clear();
        }
    }

    /// Number of rentals stored.
    pub fn len(&self) -> usize {
        self.data.read().map(|d| d.rentals.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.read()?.is_healthy {
            return Err(RepositoryError::ConnectionError(
                "Repository is not healthy".to_string(),
            ));
        }
        Ok(())
    }

    fn upsert(&self, rentals: Vec<Interval>) -> RepositoryResult<usize> {
        if let Some(bad) = rentals.iter().position(|r| r.id.trim().is_empty()) {
            return Err(RepositoryError::ValidationError(format!(
                "rental at position {} has an empty id",
                bad
            )));
        }

        let mut data = self.write()?;
        let written = rentals.len();
        for rental in rentals {
            match data.index.get(&rental.id).copied() {
                Some(pos) => data.rentals[pos] = rental,
                None => {
                    let pos = data.rentals.len();
                    data.index.insert(rental.id.clone(), pos);
                    data.rentals.push(rental);
                }
            }
        }
        Ok(written)
    }
}

#[async_trait]
impl RentalRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.read()?.is_healthy)
    }

    async fn store_rentals(&self, rentals: Vec<Interval>) -> RepositoryResult<usize> {
        self.check_health()?;
        let written = self.upsert(rentals)?;
        log::debug!("Stored {} rentals in local repository", written);
        Ok(written)
    }

    async fn get_rental(&self, id: &str) -> RepositoryResult<Interval> {
        self.check_health()?;
        let data = self.read()?;
        data.index
            .get(id)
            .and_then(|pos| data.rentals.get(*pos))
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Rental {} not found", id)))
    }

    async fn fetch_rentals(
        &self,
        window: &Window,
        filter: &RentalFilter,
    ) -> RepositoryResult<Vec<Interval>> {
        self.check_health()?;
        let data = self.read()?;
        Ok(data
            .rentals
            .iter()
            .filter(|r| window.overlaps(&r.range()) && filter.matches(r))
            .cloned()
            .collect())
    }

    async fn rental_count(&self) -> RepositoryResult<usize> {
        self.check_health()?;
        Ok(self.read()?.rentals.len())
    }
}
