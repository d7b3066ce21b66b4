//! Logic Module - The Scan-to-Classification Pipeline
//!
//! Stages run strictly in pipeline order within one scan:
//! ingest → grouping → (baseline read) → classifier → (baseline write)
//! → stats. Every stage except ingest is defined to never fail on
//! well-formed input.

pub mod baseline;
pub mod classifier;
pub mod grouping;
pub mod ingest;
pub mod orchestrator;
pub mod stats;
pub mod types;

pub use baseline::{BaselineRecord, BaselineStore};
pub use classifier::rules::{ClassifierThresholds, Sensitivity};
pub use orchestrator::{ScanError, ScanOptions, Scanner, ScannerState};
pub use types::{ClassifiedNetwork, NetworkGroup, Observation, ScanReport, ScanStats};
