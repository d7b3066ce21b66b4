//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::logic::baseline::storage::default_baseline_path;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Capture collaborator timeout (ms)
    pub scan_timeout_ms: u64,

    /// Confidence at or above this = suspicious
    pub classification_threshold: f32,

    /// Baseline file path; `None` disables durability (memory-only)
    pub baseline_path: Option<PathBuf>,

    /// Command line of the external scanner
    pub scanner_command: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("TWINSCAN_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            scan_timeout_ms: env::var("TWINSCAN_SCAN_TIMEOUT_MS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(10_000),

            classification_threshold: env::var("TWINSCAN_CLASSIFICATION_THRESHOLD")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(0.6),

            baseline_path: match env::var("TWINSCAN_BASELINE_PATH") {
                Ok(p) if p.is_empty() || p == "memory" => None,
                Ok(p) => Some(PathBuf::from(p)),
                Err(_) => Some(default_baseline_path()),
            },

            scanner_command: env::var("TWINSCAN_SCANNER_CMD")
                .unwrap_or_else(|_| "python3 scripts/wifi_scanner.py".to_string()),
        }
    }
}
