use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::domain::{Interval, RentalDetails};
use crate::core::error::{TimelineError, TimelineResult};
use crate::time::calendar::parse_utc_date;

/// Wire form of a rental as exported by the ERP or posted to the API.
///
/// Dates are strings (`YYYY-MM-DD` or an RFC 3339 timestamp, read in UTC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalRecord {
    pub id: String,
    pub subject_id: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub group_keys: Vec<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub quote_id: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub months: Option<u32>,
    #[serde(default)]
    pub subject_code: Option<String>,
    #[serde(default)]
    pub subject_title: Option<String>,
    #[serde(default)]
    pub subject_city: Option<String>,
}

impl TryFrom<RentalRecord> for Interval {
    type Error = TimelineError;

    fn try_from(record: RentalRecord) -> TimelineResult<Self> {
        let start = parse_utc_date(&record.start)?;
        let end = parse_utc_date(&record.end)?;

        let label = record
            .label
            .clone()
            .or_else(|| record.client.clone())
            .or_else(|| record.code.clone())
            .unwrap_or_default();

        Ok(Interval::new(record.id, record.subject_id, start, end)
            .with_label(label)
            .with_group_keys(record.group_keys)
            .with_details(RentalDetails {
                code: record.code,
                quote_id: record.quote_id,
                client: record.client,
                seller: record.seller,
                status: record.status,
                total: record.total,
                months: record.months,
                subject_code: record.subject_code,
                subject_title: record.subject_title,
                subject_city: record.subject_city,
            }))
    }
}

/// Convert records to intervals, naming the failing record on error.
pub fn records_to_intervals(records: Vec<RentalRecord>) -> TimelineResult<Vec<Interval>> {
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            let id = record.id.clone();
            Interval::try_from(record).map_err(|e| {
                TimelineError::Load(format!("rental [{}] (id '{}'): {}", idx, id, e))
            })
        })
        .collect()
}

/// Parse a JSON array of rental records.
///
/// Structural errors report the JSON path of the offending value.
pub fn load_rentals_from_json_str(json: &str) -> TimelineResult<Vec<Interval>> {
    let de = &mut serde_json::Deserializer::from_str(json);
    let records: Vec<RentalRecord> = serde_path_to_error::deserialize(de)
        .map_err(|e| TimelineError::Load(format!("at {}: {}", e.path(), e.inner())))?;
    records_to_intervals(records)
}

/// Read and parse a JSON file of rental records.
pub fn load_rentals_from_json_file(path: &Path) -> TimelineResult<Vec<Interval>> {
    let content = fs::read_to_string(path)
        .map_err(|e| TimelineError::Load(format!("failed to read {}: {}", path.display(), e)))?;
    let rentals = load_rentals_from_json_str(&content)?;
    log::info!("Loaded {} rentals from {}", rentals.len(), path.display());
    Ok(rentals)
}
