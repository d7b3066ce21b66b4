//! Observation Ingest
//!
//! Normalizes the capture collaborator's raw JSON into canonical
//! [`Observation`] records. The only place a malformed payload can fail
//! the pipeline - downstream stages never fail on well-formed input.

use serde_json::Value;
use thiserror::Error;

use super::types::Observation;

#[derive(Debug, Error)]
pub enum IngestError {
    /// The collaborator payload is not a JSON array of records.
    #[error("capture payload is not a scan list: got {0}")]
    NotAScanList(&'static str),
}

/// Normalize the raw capture payload.
///
/// Records without a usable `bssid` cannot be deduplicated or tracked and
/// are dropped; a non-numeric `signal` likewise drops the record. A
/// missing `ssid` becomes the empty-string hidden-network sentinel.
pub fn ingest(raw: &Value) -> Result<Vec<Observation>, IngestError> {
    let records = match raw {
        Value::Array(records) => records,
        other => return Err(IngestError::NotAScanList(json_kind(other))),
    };

    let mut observations = Vec::with_capacity(records.len());
    for record in records {
        let bssid = match record.get("bssid").and_then(Value::as_str) {
            Some(b) if !b.trim().is_empty() => b.trim().to_string(),
            _ => {
                tracing::debug!("dropping record without bssid: {}", record);
                continue;
            }
        };

        let signal = match record.get("signal").and_then(Value::as_f64) {
            Some(s) => s.round() as i32,
            None => {
                tracing::debug!("dropping record without numeric signal: {}", record);
                continue;
            }
        };

        let ssid = record
            .get("ssid")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        observations.push(Observation { ssid, bssid, signal });
    }

    Ok(observations)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// TESTS
// ============================================================================
