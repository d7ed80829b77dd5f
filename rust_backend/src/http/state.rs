//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::TimelineSettings;
use crate::db::repository::RentalRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Rental storage
    pub repository: Arc<dyn RentalRepository>,
    /// Defaults for parameters a request leaves out
    pub defaults: TimelineSettings,
}

impl AppState {
    /// Create a new application state with default timeline settings.
    pub fn new(repository: Arc<dyn RentalRepository>) -> Self {
        Self {
            repository,
            defaults: TimelineSettings::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: TimelineSettings) -> Self {
        self.defaults = defaults;
        self
    }
}
