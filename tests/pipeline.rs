//! End-to-end pipeline scenarios with injected capture sources.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use twinscan::capture::{CaptureError, CaptureSource};
use twinscan::logic::{
    BaselineStore, ClassifierThresholds, ScanError, ScanOptions, Scanner, ScannerState,
};

// ============================================================================
// TEST CAPTURE SOURCES
// ============================================================================

struct StaticCapture {
    payload: Value,
}

#[axum::async_trait]
impl CaptureSource for StaticCapture {
    async fn capture(&self) -> Result<Value, CaptureError> {
        Ok(self.payload.clone())
    }
}

struct SlowCapture {
    delay: Duration,
}

#[axum::async_trait]
impl CaptureSource for SlowCapture {
    async fn capture(&self) -> Result<Value, CaptureError> {
        tokio::time::sleep(self.delay).await;
        Ok(json!([]))
    }
}

struct FailingCapture;

#[axum::async_trait]
impl CaptureSource for FailingCapture {
    async fn capture(&self) -> Result<Value, CaptureError> {
        Err(CaptureError::ScannerFailed {
            code: 1,
            stderr: "No wireless interfaces found".to_string(),
        })
    }
}

fn scanner_with(payload: Value) -> (Scanner, Arc<BaselineStore>) {
    let baseline = Arc::new(BaselineStore::in_memory());
    let scanner = Scanner::new(
        Arc::new(StaticCapture { payload }),
        Arc::clone(&baseline),
    );
    (scanner, baseline)
}

fn opts() -> ScanOptions {
    ScanOptions {
        timeout: Duration::from_secs(5),
        thresholds: ClassifierThresholds::default(),
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

/// Scenario A: two radios answering "Home" with no history are both
/// flagged.
#[tokio::test]
async fn duplicate_radios_without_history_are_suspicious() {
    let (scanner, _) = scanner_with(json!([
        {"ssid": "Home", "bssid": "AA:AA", "signal": -40},
        {"ssid": "Home", "bssid": "BB:BB", "signal": -42},
    ]));

    let report = scanner.scan(&opts()).await.unwrap();
    assert_eq!(report.networks.len(), 2);
    for n in &report.networks {
        assert!(n.suspicious);
        assert!(n.confidence >= 0.6);
    }
    assert_eq!(report.stats.suspicious_count, 2);
    assert_eq!(report.stats.avg_bssid_count, 2.0);
}

/// Scenario B: a single first-seen radio is benign with low confidence.
#[tokio::test]
async fn first_seen_single_radio_is_benign() {
    let (scanner, _) = scanner_with(json!([
        {"ssid": "Cafe", "bssid": "11:11", "signal": -60},
    ]));

    let report = scanner.scan(&opts()).await.unwrap();
    assert_eq!(report.networks.len(), 1);
    assert!(!report.networks[0].suspicious);
    assert!(report.networks[0].confidence < 0.3);
}

/// Scenario C: a capture timeout is a full scan failure and leaves the
/// baseline untouched.
#[tokio::test]
async fn timeout_fails_scan_without_touching_baseline() {
    let baseline = Arc::new(BaselineStore::in_memory());
    let scanner = Scanner::new(
        Arc::new(SlowCapture {
            delay: Duration::from_secs(30),
        }),
        Arc::clone(&baseline),
    );

    let short = ScanOptions {
        timeout: Duration::from_millis(50),
        thresholds: ClassifierThresholds::default(),
    };

    let err = scanner.scan(&short).await.unwrap_err();
    assert!(matches!(err, ScanError::Timeout { timeout_ms: 50 }));
    assert!(baseline.is_empty());
    assert_eq!(scanner.state(), ScannerState::Idle);

    let last = scanner.last_scan().unwrap();
    assert!(!last.succeeded);
    assert!(last.error.unwrap().contains("timed out"));
}

/// Scenario D: a 35 dBm shift against a settled single-radio baseline is
/// flagged even with one BSSID in the scan.
#[tokio::test]
async fn baseline_deviation_flags_single_radio() {
    let baseline = Arc::new(BaselineStore::in_memory());
    for _ in 0..3 {
        let scanner = Scanner::new(
            Arc::new(StaticCapture {
                payload: json!([{"ssid": "Office", "bssid": "AA:AA", "signal": -50}]),
            }),
            Arc::clone(&baseline),
        );
        scanner.scan(&opts()).await.unwrap();
    }

    let scanner = Scanner::new(
        Arc::new(StaticCapture {
            payload: json!([{"ssid": "Office", "bssid": "AA:AA", "signal": -85}]),
        }),
        Arc::clone(&baseline),
    );

    let report = scanner.scan(&opts()).await.unwrap();
    assert_eq!(report.networks.len(), 1);
    assert!(report.networks[0].suspicious);
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[tokio::test]
async fn identical_input_and_baseline_give_identical_output() {
    let payload = json!([
        {"ssid": "Home", "bssid": "AA:AA", "signal": -40},
        {"ssid": "Home", "bssid": "BB:BB", "signal": -42},
        {"ssid": "Cafe", "bssid": "11:11", "signal": -60},
    ]);

    let (first, _) = scanner_with(payload.clone());
    let (second, _) = scanner_with(payload);

    let a = first.scan(&opts()).await.unwrap();
    let b = second.scan(&opts()).await.unwrap();

    assert_eq!(a.networks, b.networks);
    assert_eq!(a.stats, b.stats);
}

#[tokio::test]
async fn total_networks_equals_classified_length() {
    let (scanner, _) = scanner_with(json!([
        {"ssid": "Home", "bssid": "AA:AA", "signal": -40},
        {"ssid": "Home", "bssid": "BB:BB", "signal": -42},
        {"ssid": "Cafe", "bssid": "11:11", "signal": -60},
        {"bssid": "22:22", "signal": -70},
    ]));

    let report = scanner.scan(&opts()).await.unwrap();
    assert_eq!(report.stats.total_networks, report.networks.len());
}

#[tokio::test]
async fn empty_scan_yields_zeroed_stats() {
    let (scanner, _) = scanner_with(json!([]));

    let report = scanner.scan(&opts()).await.unwrap();
    assert!(report.networks.is_empty());
    assert_eq!(report.stats.avg_signal, 0.0);
    assert_eq!(report.stats.avg_bssid_count, 0.0);
}

#[tokio::test]
async fn successful_scan_builds_baseline_history() {
    let (scanner, baseline) = scanner_with(json!([
        {"ssid": "Home", "bssid": "AA:AA", "signal": -40},
        {"ssid": "Home", "bssid": "BB:BB", "signal": -42},
    ]));

    scanner.scan(&opts()).await.unwrap();

    let record = baseline.get("Home").unwrap();
    assert_eq!(record.observation_count, 1);
    assert_eq!(record.mean_bssid_count, 2.0);
    assert_eq!(record.mean_signal, -41.0);
}

// ============================================================================
// FAILURE SURFACES
// ============================================================================

#[tokio::test]
async fn scanner_failure_surfaces_stderr() {
    let baseline = Arc::new(BaselineStore::in_memory());
    let scanner = Scanner::new(Arc::new(FailingCapture), Arc::clone(&baseline));

    let err = scanner.scan(&opts()).await.unwrap_err();
    assert!(err.to_string().contains("No wireless interfaces"));
    assert!(baseline.is_empty());
}

#[tokio::test]
async fn malformed_payload_is_a_scan_failure() {
    let (scanner, baseline) = scanner_with(json!({"unexpected": "object"}));

    let err = scanner.scan(&opts()).await.unwrap_err();
    assert!(matches!(err, ScanError::Malformed(_)));
    assert!(baseline.is_empty());
}

/// An overlapping scan finishing first must not clear the bookkeeping of
/// one still capturing: the long scan stays visible and cancellable.
#[tokio::test]
async fn overlapping_scans_do_not_clobber_cancellation() {
    let scanner = Arc::new(Scanner::new(
        Arc::new(SlowCapture {
            delay: Duration::from_secs(60),
        }),
        Arc::new(BaselineStore::in_memory()),
    ));

    let long_task = {
        let scanner = Arc::clone(&scanner);
        tokio::spawn(async move { scanner.scan(&opts()).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    // A second scan that times out while the first capture is running.
    let short = ScanOptions {
        timeout: Duration::from_millis(10),
        thresholds: ClassifierThresholds::default(),
    };
    let second = scanner.scan(&short).await;
    assert!(matches!(second, Err(ScanError::Timeout { .. })));

    assert_eq!(scanner.state(), ScannerState::Scanning);
    assert!(scanner.cancel());

    let first = long_task.await.unwrap();
    assert!(matches!(first, Err(ScanError::Cancelled)));
    assert_eq!(scanner.state(), ScannerState::Idle);
}

/// A store whose file cannot be written degrades to memory: the scan
/// still succeeds and the in-memory history advances.
#[tokio::test]
async fn persistence_failure_degrades_to_memory() {
    let dir = tempfile::tempdir().unwrap();
    // A plain file where the store expects its parent directory, so
    // every save attempt fails regardless of process privileges.
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"in the way").unwrap();

    let baseline = Arc::new(BaselineStore::open(blocker.join("baseline.json")));
    assert!(baseline.flush().is_err());

    let scanner = Scanner::new(
        Arc::new(StaticCapture {
            payload: json!([{"ssid": "Home", "bssid": "AA:AA", "signal": -40}]),
        }),
        Arc::clone(&baseline),
    );

    let report = scanner.scan(&opts()).await.unwrap();
    assert_eq!(report.stats.total_networks, 1);
    assert_eq!(baseline.get("Home").unwrap().observation_count, 1);
}

#[tokio::test]
async fn cancellation_abandons_the_capture() {
    let scanner = Arc::new(Scanner::new(
        Arc::new(SlowCapture {
            delay: Duration::from_secs(60),
        }),
        Arc::new(BaselineStore::in_memory()),
    ));

    let task = {
        let scanner = Arc::clone(&scanner);
        tokio::spawn(async move { scanner.scan(&opts()).await })
    };

    // Let the scan reach the capture call, then cancel it.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(scanner.state(), ScannerState::Scanning);
    assert!(scanner.cancel());

    let result = task.await.unwrap();
    assert!(matches!(result, Err(ScanError::Cancelled)));
    assert_eq!(scanner.state(), ScannerState::Idle);
}
