//! Baseline Types
//!
//! Persisted per-SSID historical profiles. No logic beyond the
//! incremental update itself.

use serde::{Deserialize, Serialize};

// ============================================================================
// BASELINE RECORD
// ============================================================================

/// Historical profile of one SSID's normal behavior.
///
/// Updated incrementally after every successful scan that includes the
/// SSID; never overwritten wholesale, never deleted automatically (only
/// an explicit reset clears it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineRecord {
    pub ssid: String,
    /// Running mean of distinct radios answering this SSID per scan.
    pub mean_bssid_count: f32,
    /// Running mean of the per-scan mean signal (dBm).
    pub mean_signal: f32,
    /// Welford M2 accumulator for the signal mean.
    pub signal_m2: f32,
    /// Number of scans contributing to this record.
    pub observation_count: u64,
    pub first_seen: i64,
    pub last_updated: i64,
}

impl BaselineRecord {
    pub fn new(ssid: &str) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            ssid: ssid.to_string(),
            mean_bssid_count: 0.0,
            mean_signal: 0.0,
            signal_m2: 0.0,
            observation_count: 0,
            first_seen: now,
            last_updated: now,
        }
    }

    /// Population standard deviation of the per-scan mean signal.
    pub fn signal_std_dev(&self) -> f32 {
        if self.observation_count == 0 {
            return 0.0;
        }
        (self.signal_m2 / self.observation_count as f32).sqrt()
    }

    /// Blend one scan's features into the running profile.
    ///
    /// Running-mean form: `mean' = mean + (x - mean) / (n + 1)`, with a
    /// Welford update for the signal variance, then `n += 1`.
    pub fn absorb(&mut self, observed_bssid_count: usize, observed_mean_signal: f32) {
        let n = (self.observation_count + 1) as f32;

        let count = observed_bssid_count as f32;
        self.mean_bssid_count += (count - self.mean_bssid_count) / n;

        let delta = observed_mean_signal - self.mean_signal;
        self.mean_signal += delta / n;
        let delta_new = observed_mean_signal - self.mean_signal;
        self.signal_m2 += delta * delta_new;

        self.observation_count += 1;
        self.last_updated = chrono::Utc::now().timestamp();
    }
}

// ============================================================================
// SNAPSHOT (for the inspection endpoint)
// ============================================================================

/// Read-only view of a record with the derived std dev materialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineSnapshot {
    pub ssid: String,
    pub mean_bssid_count: f32,
    pub mean_signal: f32,
    pub signal_std_dev: f32,
    pub observation_count: u64,
    pub last_updated: i64,
}

impl From<&BaselineRecord> for BaselineSnapshot {
    fn from(r: &BaselineRecord) -> Self {
        Self {
            ssid: r.ssid.clone(),
            mean_bssid_count: r.mean_bssid_count,
            mean_signal: r.mean_signal,
            signal_std_dev: r.signal_std_dev(),
            observation_count: r.observation_count,
            last_updated: r.last_updated,
        }
    }
}
