//! Classification Rules & Thresholds
//!
//! Constants and configurable thresholds for evil-twin scoring.
//! No classify logic here.

use serde::{Deserialize, Serialize};

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Confidence at or above this = suspicious.
pub const CLASSIFICATION_THRESHOLD: f32 = 0.6;

/// Scans an SSID must have contributed before the deviation rule judges.
/// Below this the history is too thin to call anything abnormal.
pub const MIN_BASELINE_SAMPLES: u64 = 3;

/// Deviations beyond this many standard deviations score.
pub const DEVIATION_SIGMAS: f32 = 2.0;

/// Floor for the baseline signal std dev (dBm). Keeps z-scores finite for
/// networks whose history is nearly constant.
pub const MIN_SIGNAL_STD_DEV: f32 = 4.0;

// ============================================================================
// WEIGHTS
// ============================================================================

/// Scales the duplicate-radio base score `(count - 1) / count`.
/// Two radios on one name ⇒ 0.75, three ⇒ 1.0.
pub const DUPLICATE_WEIGHT: f32 = 1.5;

/// Base score when a whole new radio appears beyond the historical mean.
pub const NEW_RADIO_BASE: f32 = 0.7;

/// Additional score per extra radio beyond the first unexpected one.
pub const NEW_RADIO_SLOPE: f32 = 0.1;

/// Extra radios (beyond the historical mean) needed to count as a new
/// unexpected BSSID.
pub const NEW_RADIO_DELTA_MIN: f32 = 1.0;

/// Confidence reported when no rule fires - insufficient evidence, not
/// flaggable purely on first sight.
pub const BENIGN_CONFIDENCE: f32 = 0.1;

// ============================================================================
// CONFIGURABLE THRESHOLDS
// ============================================================================

/// Runtime-adjustable subset of the rule constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    /// Confidence at or above this = suspicious.
    pub classification_threshold: f32,
    /// Sigmas before the baseline deviation rule scores.
    pub deviation_sigmas: f32,
    /// Minimum scans of history before the deviation rule judges.
    pub min_baseline_samples: u64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            classification_threshold: CLASSIFICATION_THRESHOLD,
            deviation_sigmas: DEVIATION_SIGMAS,
            min_baseline_samples: MIN_BASELINE_SAMPLES,
        }
    }
}

impl ClassifierThresholds {
    /// High sensitivity - lower thresholds, more flags.
    pub fn high_sensitivity() -> Self {
        Self {
            classification_threshold: 0.5,
            deviation_sigmas: 1.5,
            ..Default::default()
        }
    }

    /// Low sensitivity - higher thresholds, fewer flags.
    pub fn low_sensitivity() -> Self {
        Self {
            classification_threshold: 0.8,
            deviation_sigmas: 3.0,
            ..Default::default()
        }
    }

    /// Override just the suspicion threshold (per-request option).
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            classification_threshold: threshold.clamp(0.0, 1.0),
            ..Default::default()
        }
    }
}

// ============================================================================
// SENSITIVITY PRESETS
// ============================================================================

/// Request-level selector for the threshold presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    High,
    Normal,
    Low,
}

impl Sensitivity {
    pub fn thresholds(&self) -> ClassifierThresholds {
        match self {
            Sensitivity::High => ClassifierThresholds::high_sensitivity(),
            Sensitivity::Normal => ClassifierThresholds::default(),
            Sensitivity::Low => ClassifierThresholds::low_sensitivity(),
        }
    }
}
