//! Baseline persistence.
//!
//! JSON file keyed by SSID. Durability is optional - a store with no path
//! satisfies the contract in memory only. Writes go through a temp file
//! rename so a crash mid-save never corrupts the existing history.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::types::BaselineRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("baseline io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("baseline serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Default baseline path under the platform data directory.
pub fn default_baseline_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("twinscan")
        .join("baseline_v1.json")
}

/// Save all records to disk.
pub fn save_records(
    records: &HashMap<String, BaselineRecord>,
    path: &Path,
) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_vec_pretty(records)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Load records from disk. A missing file is an empty history, not an
/// error; a corrupt file is surfaced so the caller can decide.
pub fn load_records(path: &Path) -> Result<HashMap<String, BaselineRecord>, StoreError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let data = fs::read(path)?;
    let records: HashMap<String, BaselineRecord> = serde_json::from_slice(&data)?;
    Ok(records)
}
