//! Grouping & Feature Extraction
//!
//! Builds per-SSID groups and the two features the classifier scores on:
//! distinct-radio count and signal distribution. Pure functions of their
//! input - no side effects, no ordering assumptions over observations.

use std::collections::HashMap;

use super::types::{NetworkGroup, Observation};

/// Group observations by exact (case-sensitive) SSID match.
pub fn group_by_ssid(observations: &[Observation]) -> HashMap<String, NetworkGroup> {
    let mut groups: HashMap<String, NetworkGroup> = HashMap::new();

    for obs in observations {
        let group = groups
            .entry(obs.ssid.clone())
            .or_insert_with(|| NetworkGroup {
                ssid: obs.ssid.clone(),
                bssids: Default::default(),
                signals: Vec::new(),
                mean_signal: 0.0,
                signal_std_dev: 0.0,
            });

        group.signals.push(obs.signal);

        // Keep the strongest reading per radio (dBm: closer to 0 = stronger).
        group
            .bssids
            .entry(obs.bssid.clone())
            .and_modify(|s| *s = (*s).max(obs.signal))
            .or_insert(obs.signal);
    }

    for group in groups.values_mut() {
        group.mean_signal = mean(&group.signals);
        group.signal_std_dev = population_std_dev(&group.signals, group.mean_signal);
    }

    groups
}

pub fn mean(signals: &[i32]) -> f32 {
    if signals.is_empty() {
        return 0.0;
    }
    signals.iter().map(|s| *s as f32).sum::<f32>() / signals.len() as f32
}

/// Population standard deviation; 0.0 for a single member.
pub fn population_std_dev(signals: &[i32], mean: f32) -> f32 {
    if signals.len() < 2 {
        return 0.0;
    }
    let variance = signals
        .iter()
        .map(|s| {
            let d = *s as f32 - mean;
            d * d
        })
        .sum::<f32>()
        / signals.len() as f32;
    variance.sqrt()
}

// ============================================================================
// TESTS
// ============================================================================
