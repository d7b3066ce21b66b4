//! Baseline Store
//!
//! Owns the per-SSID historical profiles the classifier scores against.
//!
//! # Architecture
//! - `types.rs`: `BaselineRecord` and its incremental update
//! - `storage.rs`: optional JSON persistence
//!
//! # Concurrency
//! Outer `RwLock` guards only the SSID map; each record sits behind its
//! own `Mutex`, so concurrent scans touching the same SSID serialize
//! their read-modify-write on that record alone while scans over
//! disjoint SSID sets proceed independently. The store is never held
//! locked for the duration of a scan.
//!
//! # Failure Strategy
//! Persistence failures are logged and ignored - classification degrades
//! to the in-memory baseline rather than failing the scan.

pub mod storage;
pub mod types;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

pub use storage::StoreError;
pub use types::{BaselineRecord, BaselineSnapshot};

/// Injected store instance - one per process (or per test).
pub struct BaselineStore {
    records: RwLock<HashMap<String, Arc<Mutex<BaselineRecord>>>>,
    /// `None` = memory-only store (durability disabled).
    path: Option<PathBuf>,
}

impl BaselineStore {
    /// Memory-only store. Used by tests and when durability is disabled.
    pub fn in_memory() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            path: None,
        }
    }

    /// Durable store backed by a JSON file. A missing file starts empty;
    /// a corrupt file is discarded with a warning rather than refusing
    /// to start.
    pub fn open(path: PathBuf) -> Self {
        let loaded = match storage::load_records(&path) {
            Ok(records) => {
                if !records.is_empty() {
                    tracing::info!(
                        "loaded baseline for {} networks from {}",
                        records.len(),
                        path.display()
                    );
                }
                records
            }
            Err(e) => {
                tracing::warn!("baseline load failed: {}. Starting with empty history.", e);
                HashMap::new()
            }
        };

        let records = loaded
            .into_iter()
            .map(|(ssid, r)| (ssid, Arc::new(Mutex::new(r))))
            .collect();

        Self {
            records: RwLock::new(records),
            path: Some(path),
        }
    }

    /// Snapshot of one SSID's profile, if it has any history.
    pub fn get(&self, ssid: &str) -> Option<BaselineRecord> {
        let records = self.records.read();
        records.get(ssid).map(|r| r.lock().clone())
    }

    /// Blend one scan's observed features into the SSID's profile,
    /// creating the record on first sighting. Only the individual record
    /// update is a critical section.
    pub fn update(&self, ssid: &str, observed_bssid_count: usize, observed_mean_signal: f32) {
        let record = {
            let records = self.records.read();
            records.get(ssid).cloned()
        };

        let record = match record {
            Some(r) => r,
            None => {
                let mut records = self.records.write();
                records
                    .entry(ssid.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(BaselineRecord::new(ssid))))
                    .clone()
            }
        };

        record
            .lock()
            .absorb(observed_bssid_count, observed_mean_signal);
    }

    /// Clear all records and persist the empty state.
    pub fn reset(&self) {
        self.records.write().clear();
        if let Err(e) = self.flush() {
            tracing::error!("failed to persist baseline reset: {}", e);
        }
        tracing::info!("baseline history reset");
    }

    /// All records, std dev materialized, sorted by SSID.
    pub fn snapshot(&self) -> Vec<BaselineSnapshot> {
        let records = self.records.read();
        let mut all: Vec<BaselineSnapshot> =
            records.values().map(|r| (&*r.lock()).into()).collect();
        all.sort_by(|a, b| a.ssid.cmp(&b.ssid));
        all
    }

    /// Number of SSIDs with history.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Best-effort save. A no-op for memory-only stores.
    pub fn flush(&self) -> Result<(), StoreError> {
        let path = match &self.path {
            Some(p) => p,
            None => return Ok(()),
        };

        let plain: HashMap<String, BaselineRecord> = {
            let records = self.records.read();
            records
                .iter()
                .map(|(ssid, r)| (ssid.clone(), r.lock().clone()))
                .collect()
        };

        storage::save_records(&plain, path)
    }
}
