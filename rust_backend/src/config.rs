//! TOML configuration for the timeline service and server.
//!
//! ```toml
//! [timeline]
//! granularity = "month"
//! group_by = "client"
//! page_size = 100
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [data]
//! rentals_path = "data/rentals.json"
//! ```
//!
//! Every section and key is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::algorithms::grouping::GroupBy;
use crate::algorithms::layout::Granularity;
use crate::core::domain::Window;
use crate::core::error::{TimelineError, TimelineResult};
use crate::services::timeline::TimelineQuery;
use crate::transformations::pagination::{PageRequest, DEFAULT_PAGE_SIZE};

const CONFIG_FILE: &str = "timeline.toml";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub timeline: TimelineSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
}

/// Defaults applied to queries that do not set them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSettings {
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default)]
    pub group_by: GroupBy,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// HTTP bind address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Seed data for the in-memory repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default)]
    pub rentals_path: Option<PathBuf>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            group_by: GroupBy::default(),
            page_size: default_page_size(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl TimelineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(TimelineConfig)` if successful
    /// * `Err(TimelineError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> TimelineResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            TimelineError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content).map_err(|e| {
            TimelineError::Configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `timeline.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> TimelineResult<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE),
            PathBuf::from("rust_backend").join(CONFIG_FILE),
            PathBuf::from("..").join(CONFIG_FILE),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(TimelineError::Configuration(format!(
            "No {} found in standard locations",
            CONFIG_FILE
        )))
    }

    /// A query over `window` carrying the configured defaults.
    pub fn query(&self, window: Window) -> TimelineQuery {
        TimelineQuery::new(window)
            .with_group_by(self.timeline.group_by)
            .with_granularity(self.timeline.granularity)
            .with_page(PageRequest::new(1, self.timeline.page_size))
    }
}
