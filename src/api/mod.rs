//! API Handlers
//!
//! The scan boundary exposed to HTTP callers. Request bodies are
//! optional overrides on top of the configured defaults; all decision
//! logic lives in `logic`.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::AppResult;
use crate::logic::baseline::{BaselineSnapshot, BaselineStore};
use crate::logic::{ScanOptions, ScanReport, Scanner, ScannerState, Sensitivity};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub scanner: Arc<Scanner>,
    pub baseline: Arc<BaselineStore>,
    pub config: Config,
}

// ============================================================================
// SCAN
// ============================================================================

/// Optional per-request configuration overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub scan_timeout_ms: Option<u64>,
    /// Preset selector; an explicit threshold below overrides its
    /// suspicion bar.
    pub sensitivity: Option<Sensitivity>,
    pub classification_threshold: Option<f32>,
}

/// POST /api/v1/scan
pub async fn scan(
    State(state): State<AppState>,
    body: Option<Json<ScanRequest>>,
) -> AppResult<Json<ScanReport>> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let mut opts = ScanOptions::from_config(&state.config);
    if let Some(ms) = request.scan_timeout_ms {
        opts.timeout = Duration::from_millis(ms);
    }
    if let Some(sensitivity) = request.sensitivity {
        opts.thresholds = sensitivity.thresholds();
    }
    if let Some(threshold) = request.classification_threshold {
        opts.thresholds.classification_threshold = threshold.clamp(0.0, 1.0);
    }

    let report = state.scanner.scan(&opts).await?;
    Ok(Json(report))
}

/// POST /api/v1/scan/cancel
pub async fn cancel_scan(State(state): State<AppState>) -> Json<Value> {
    let cancelled = state.scanner.cancel();
    Json(json!({ "cancelled": cancelled }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub state: ScannerState,
    pub last_scan: Option<crate::logic::orchestrator::LastScan>,
    pub baseline_networks: usize,
}

/// GET /api/v1/scan/status
pub async fn scan_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        state: state.scanner.state(),
        last_scan: state.scanner.last_scan(),
        baseline_networks: state.baseline.len(),
    })
}

// ============================================================================
// BASELINE
// ============================================================================

/// GET /api/v1/baseline
pub async fn baseline_snapshot(State(state): State<AppState>) -> Json<Vec<BaselineSnapshot>> {
    Json(state.baseline.snapshot())
}

/// POST /api/v1/baseline/reset
pub async fn baseline_reset(State(state): State<AppState>) -> Json<Value> {
    state.baseline.reset();
    Json(json!({ "reset": true }))
}

// ============================================================================
// HEALTH
// ============================================================================

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
