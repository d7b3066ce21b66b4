//! Pipeline Types
//!
//! Data structures flowing through the scan pipeline.
//! No logic here - only wire/derived shapes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// OBSERVATION (one beacon seen during a scan)
// ============================================================================

/// One beacon observed by the capture collaborator.
///
/// Created per scan, consumed immediately by grouping, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Network name. Empty string = hidden SSID (grouped together).
    pub ssid: String,
    /// MAC-style hardware identifier, unique per physical radio.
    pub bssid: String,
    /// Signal strength in dBm (negative; closer to 0 = stronger).
    pub signal: i32,
}

// ============================================================================
// NETWORK GROUP (all observations sharing one SSID within a scan)
// ============================================================================

/// All observations sharing one SSID within a single scan, plus the
/// features the classifier scores on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkGroup {
    pub ssid: String,
    /// Distinct BSSIDs observed for this name, each with the strongest
    /// signal seen for that radio. Ordered for determinism.
    pub bssids: BTreeMap<String, i32>,
    /// Signal values in observation order (one per beacon, not per BSSID).
    pub signals: Vec<i32>,
    pub mean_signal: f32,
    /// Population standard deviation; 0.0 when the group has one member.
    pub signal_std_dev: f32,
}

impl NetworkGroup {
    /// More than one radio answering the same name is the central
    /// evil-twin signal.
    pub fn bssid_count(&self) -> usize {
        self.bssids.len()
    }
}

// ============================================================================
// CLASSIFIED NETWORK (final verdict per access point)
// ============================================================================

/// One access point's final verdict, keyed by `(ssid, bssid)`.
///
/// Invariant: `suspicious == true` implies
/// `confidence >= classification_threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedNetwork {
    pub ssid: String,
    pub bssid: String,
    pub signal: i32,
    pub suspicious: bool,
    /// Bounded [0, 1] certainty that this access point is malicious.
    pub confidence: f32,
    /// Human-readable rule hits that produced the verdict.
    pub reasons: Vec<String>,
}

// ============================================================================
// SCAN STATS (aggregate over one scan)
// ============================================================================

/// Aggregate over one scan's classified set. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub total_networks: usize,
    pub suspicious_count: usize,
    /// Arithmetic mean of signal over all entries; 0.0 when empty.
    pub avg_signal: f32,
    /// Mean of distinct-BSSID counts per distinct SSID (not per BSSID,
    /// which would bias toward SSIDs with many radios).
    pub avg_bssid_count: f32,
}

// ============================================================================
// SCAN REPORT (orchestrator output)
// ============================================================================

/// Final result payload returned to the caller after a successful scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_id: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub networks: Vec<ClassifiedNetwork>,
    pub stats: ScanStats,
}
