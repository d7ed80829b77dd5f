//! Error types for timeline computation.

use chrono::NaiveDate;

use crate::db::repository::RepositoryError;

/// Result type for timeline operations
pub type TimelineResult<T> = Result<T, TimelineError>;

/// Error type for timeline operations.
///
/// Packing itself is total; these variants cover caller contract violations
/// (an inverted window), unparseable wire input, configuration and the data
/// source.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("Invalid window: start {start} is after end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("Invalid group_by: {0}. Use 'none', 'client', 'seller', 'status', 'city' or 'explicit'")]
    InvalidGroupBy(String),

    #[error("Invalid granularity: {0}. Use 'month' or 'day'")]
    InvalidGranularity(String),

    #[error("Window too large: {units} {granularity} columns, at most {max} allowed")]
    WindowTooLarge {
        units: i64,
        max: i64,
        granularity: &'static str,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Load error: {0}")]
    Load(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl TimelineError {
    /// Returns `true` when the error was caused by caller input rather than
    /// by the data source or the environment.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            TimelineError::InvalidWindow { .. }
                | TimelineError::InvalidYear(_)
                | TimelineError::InvalidDate { .. }
                | TimelineError::InvalidGroupBy(_)
                | TimelineError::InvalidGranularity(_)
                | TimelineError::WindowTooLarge { .. }
                | TimelineError::Load(_)
        )
    }
}
