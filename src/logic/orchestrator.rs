//! Scan Orchestrator
//!
//! Entry point for a scan: invokes the capture collaborator under a
//! bounded timeout, runs the pipeline to completion, updates the
//! baseline, and returns the report.
//!
//! State machine: `Idle → Scanning → (Succeeded | Failed) → Idle`.
//! A timeout, cancellation, or collaborator failure is a full scan
//! failure - no partial results, no baseline mutation, no automatic
//! retry (retry policy belongs to the caller).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::capture::{CaptureError, CaptureSource};
use crate::config::Config;

use super::baseline::BaselineStore;
use super::classifier::{self, rules::ClassifierThresholds};
use super::grouping::group_by_ssid;
use super::ingest::{self, IngestError};
use super::stats::aggregate;
use super::types::{ClassifiedNetwork, ScanReport};

// ============================================================================
// ERRORS & STATE
// ============================================================================

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
    #[error("scan cancelled")]
    Cancelled,
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Malformed(#[from] IngestError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScannerState {
    Idle,
    Scanning,
}

/// Outcome of the most recent scan, kept for the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastScan {
    pub scan_id: String,
    pub finished_at: chrono::DateTime<chrono::Utc>,
    pub succeeded: bool,
    pub suspicious_count: usize,
    pub error: Option<String>,
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Per-scan options: config defaults plus any request overrides.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub timeout: Duration,
    pub thresholds: ClassifierThresholds,
}

impl ScanOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            timeout: Duration::from_millis(config.scan_timeout_ms),
            thresholds: ClassifierThresholds::with_threshold(config.classification_threshold),
        }
    }
}

// ============================================================================
// SCANNER
// ============================================================================

pub struct Scanner {
    capture: Arc<dyn CaptureSource>,
    baseline: Arc<BaselineStore>,
    /// Cancellation tokens keyed by scan id. Overlapping scans each keep
    /// their own entry, so a finishing scan never clears another's token.
    in_flight: Mutex<HashMap<String, CancellationToken>>,
    last: RwLock<Option<LastScan>>,
}

impl Scanner {
    pub fn new(capture: Arc<dyn CaptureSource>, baseline: Arc<BaselineStore>) -> Self {
        Self {
            capture,
            baseline,
            in_flight: Mutex::new(HashMap::new()),
            last: RwLock::new(None),
        }
    }

    /// Derived from the in-flight set: `Scanning` while any capture is
    /// outstanding.
    pub fn state(&self) -> ScannerState {
        if self.in_flight.lock().is_empty() {
            ScannerState::Idle
        } else {
            ScannerState::Scanning
        }
    }

    pub fn last_scan(&self) -> Option<LastScan> {
        self.last.read().clone()
    }

    /// Cancel every in-flight scan. Returns whether any was found.
    pub fn cancel(&self) -> bool {
        let in_flight = self.in_flight.lock();
        for token in in_flight.values() {
            token.cancel();
        }
        !in_flight.is_empty()
    }

    /// Run one full scan. The capture call is the only suspension point;
    /// the pipeline stages are pure, synchronous transforms.
    pub async fn scan(&self, opts: &ScanOptions) -> Result<ScanReport, ScanError> {
        let scan_id = uuid::Uuid::new_v4().to_string();
        let cancel = CancellationToken::new();
        self.in_flight.lock().insert(scan_id.clone(), cancel.clone());

        let result = self.run(&scan_id, opts, &cancel).await;

        self.in_flight.lock().remove(&scan_id);
        self.record_outcome(&scan_id, &result);

        result
    }

    async fn run(
        &self,
        scan_id: &str,
        opts: &ScanOptions,
        cancel: &CancellationToken,
    ) -> Result<ScanReport, ScanError> {
        let started_at = chrono::Utc::now();
        tracing::info!("scan {} started (timeout {:?})", scan_id, opts.timeout);

        let raw = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::warn!("scan {} cancelled", scan_id);
                return Err(ScanError::Cancelled);
            }
            out = tokio::time::timeout(opts.timeout, self.capture.capture()) => match out {
                Err(_) => {
                    return Err(ScanError::Timeout {
                        timeout_ms: opts.timeout.as_millis() as u64,
                    });
                }
                Ok(Err(e)) => return Err(e.into()),
                Ok(Ok(payload)) => payload,
            }
        };

        let observations = ingest::ingest(&raw)?;
        let groups = group_by_ssid(&observations);

        let mut networks: Vec<ClassifiedNetwork> = Vec::new();
        for group in groups.values() {
            let baseline = self.baseline.get(&group.ssid);
            networks.extend(classifier::classify(group, baseline.as_ref(), &opts.thresholds));
        }
        // Deterministic output order regardless of hash iteration
        networks.sort_by(|a, b| (&a.ssid, &a.bssid).cmp(&(&b.ssid, &b.bssid)));

        let stats = aggregate(&networks);

        // History only learns from completed scans; failures never reach
        // this point.
        for group in groups.values() {
            self.baseline
                .update(&group.ssid, group.bssid_count(), group.mean_signal);
        }
        if let Err(e) = self.baseline.flush() {
            tracing::error!("baseline persistence failed, continuing in memory: {}", e);
        }

        tracing::info!(
            "scan {} complete: {} access points, {} suspicious",
            scan_id,
            stats.total_networks,
            stats.suspicious_count
        );

        Ok(ScanReport {
            scan_id: scan_id.to_string(),
            started_at,
            networks,
            stats,
        })
    }

    fn record_outcome(&self, scan_id: &str, result: &Result<ScanReport, ScanError>) {
        let last = match result {
            Ok(report) => LastScan {
                scan_id: scan_id.to_string(),
                finished_at: chrono::Utc::now(),
                succeeded: true,
                suspicious_count: report.stats.suspicious_count,
                error: None,
            },
            Err(e) => LastScan {
                scan_id: scan_id.to_string(),
                finished_at: chrono::Utc::now(),
                succeeded: false,
                suspicious_count: 0,
                error: Some(e.to_string()),
            },
        };
        *self.last.write() = Some(last);
    }
}
