//! Anomaly Classifier
//!
//! Scores each network group against its baseline (or global heuristics
//! for first-seen networks) and emits one verdict per BSSID.
//!
//! Rule priority:
//! 1. Duplicate-BSSID: multiple radios answering one name.
//! 2. Baseline deviation: z-score of signal and radio count against the
//!    SSID's historical profile (independent of rule 1, so a single new
//!    unexpected radio on a historically single-radio network flags).
//! 3. No baseline + single radio: not suspicious, low confidence.
//!
//! Rule scores combine by max, clamped to [0, 1]; never fails on a
//! well-formed group - an absent baseline is a valid input state.

pub mod rules;

use super::baseline::BaselineRecord;
use super::types::{ClassifiedNetwork, NetworkGroup};
use rules::{
    ClassifierThresholds, BENIGN_CONFIDENCE, DUPLICATE_WEIGHT, MIN_SIGNAL_STD_DEV,
    NEW_RADIO_BASE, NEW_RADIO_DELTA_MIN, NEW_RADIO_SLOPE,
};

/// Classify every radio in a group. All members share the group-level
/// suspicion signal but carry their individual signal reading.
pub fn classify(
    group: &NetworkGroup,
    baseline: Option<&BaselineRecord>,
    thresholds: &ClassifierThresholds,
) -> Vec<ClassifiedNetwork> {
    let mut confidence: f32 = 0.0;
    let mut reasons = Vec::new();

    // Rule 1: duplicate radios answering the same SSID
    let count = group.bssid_count();
    if count > 1 {
        let dup_score = (DUPLICATE_WEIGHT * (count as f32 - 1.0) / count as f32).min(1.0);
        confidence = confidence.max(dup_score);
        reasons.push(format!("{} radios broadcasting one SSID", count));
    }

    // Rule 2: deviation from the SSID's historical profile
    if let Some(baseline) = baseline {
        if baseline.observation_count >= thresholds.min_baseline_samples {
            let std = baseline.signal_std_dev().max(MIN_SIGNAL_STD_DEV);
            let z = (group.mean_signal - baseline.mean_signal).abs() / std;
            if z >= thresholds.deviation_sigmas {
                let dev_score = (z / (2.0 * thresholds.deviation_sigmas)).min(1.0);
                confidence = confidence.max(dev_score);
                reasons.push(format!(
                    "signal {:.1} dBm deviates {:.1}σ from baseline {:.1} dBm",
                    group.mean_signal, z, baseline.mean_signal
                ));
            }

            let delta = count as f32 - baseline.mean_bssid_count;
            if delta >= NEW_RADIO_DELTA_MIN {
                let radio_score =
                    (NEW_RADIO_BASE + NEW_RADIO_SLOPE * (delta - NEW_RADIO_DELTA_MIN)).min(1.0);
                confidence = confidence.max(radio_score);
                reasons.push(format!(
                    "{} radios vs historical mean {:.1}",
                    count, baseline.mean_bssid_count
                ));
            }
        }
    }

    // Rule 3: no usable history and nothing anomalous ⇒ not flaggable on
    // first sight
    if confidence == 0.0 {
        confidence = BENIGN_CONFIDENCE;
    }

    let confidence = confidence.clamp(0.0, 1.0);
    let suspicious = confidence >= thresholds.classification_threshold;

    group
        .bssids
        .iter()
        .map(|(bssid, signal)| ClassifiedNetwork {
            ssid: group.ssid.clone(),
            bssid: bssid.clone(),
            signal: *signal,
            suspicious,
            confidence,
            reasons: reasons.clone(),
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
