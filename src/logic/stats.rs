//! Aggregator
//!
//! Summary statistics over one scan's classified set. Derived every scan,
//! never persisted, never fails.

use std::collections::{HashMap, HashSet};

use super::types::{ClassifiedNetwork, ScanStats};

/// Aggregate the classified set.
pub fn aggregate(classified: &[ClassifiedNetwork]) -> ScanStats {
    let total_networks = classified.len();
    let suspicious_count = classified.iter().filter(|c| c.suspicious).count();

    let avg_signal = if classified.is_empty() {
        0.0
    } else {
        classified.iter().map(|c| c.signal as f32).sum::<f32>() / classified.len() as f32
    };

    // Radio count per distinct SSID, so names with many radios do not
    // dominate the mean.
    let mut radios_per_ssid: HashMap<&str, HashSet<&str>> = HashMap::new();
    for c in classified {
        radios_per_ssid
            .entry(c.ssid.as_str())
            .or_default()
            .insert(c.bssid.as_str());
    }

    let avg_bssid_count = if radios_per_ssid.is_empty() {
        0.0
    } else {
        radios_per_ssid.values().map(|b| b.len() as f32).sum::<f32>()
            / radios_per_ssid.len() as f32
    };

    ScanStats {
        total_networks,
        suspicious_count,
        avg_signal,
        avg_bssid_count,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ssid: &str, bssid: &str, signal: i32, suspicious: bool) -> ClassifiedNetwork {
        ClassifiedNetwork {
            ssid: ssid.to_string(),
            bssid: bssid.to_string(),
            signal,
            suspicious,
            confidence: if suspicious { 0.8 } else { 0.1 },
            reasons: vec![],
        }
    }

    #[test]
    fn test_empty_set_is_all_zeros() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_networks, 0);
        assert_eq!(stats.suspicious_count, 0);
        assert_eq!(stats.avg_signal, 0.0);
        assert_eq!(stats.avg_bssid_count, 0.0);
    }

    #[test]
    fn test_total_equals_classified_length() {
        let classified = vec![
            entry("Home", "AA:AA", -40, true),
            entry("Home", "BB:BB", -42, true),
            entry("Cafe", "11:11", -60, false),
        ];
        let stats = aggregate(&classified);
        assert_eq!(stats.total_networks, classified.len());
        assert_eq!(stats.suspicious_count, 2);
    }

    #[test]
    fn test_avg_signal_over_entries() {
        let stats = aggregate(&[
            entry("A", "AA:AA", -40, false),
            entry("B", "BB:BB", -60, false),
        ]);
        assert_eq!(stats.avg_signal, -50.0);
    }

    #[test]
    fn test_avg_bssid_count_is_per_ssid() {
        // "Home" has 2 radios, "Cafe" has 1 ⇒ mean 1.5, not 3/2 entries
        // weighted per BSSID.
        let stats = aggregate(&[
            entry("Home", "AA:AA", -40, true),
            entry("Home", "BB:BB", -42, true),
            entry("Cafe", "11:11", -60, false),
        ]);
        assert_eq!(stats.avg_bssid_count, 1.5);
    }
}
