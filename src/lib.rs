//! Twinscan - Evil-Twin Access Point Detection
//!
//! Detects rogue access points that mimic a legitimate network's SSID by
//! running observed beacons through a scan-to-classification pipeline:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        TWINSCAN CORE                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Capture ──▶ Ingest ──▶ Grouping ──▶ Classifier ──▶ Stats    │
//! │  (external)                  │            ▲                  │
//! │                              ▼            │                  │
//! │                        ┌───────────────────┐                 │
//! │                        │  Baseline Store   │                 │
//! │                        │  (per-SSID JSON)  │                 │
//! │                        └───────────────────┘                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The radio-frequency capture itself is an external collaborator behind
//! the [`capture::CaptureSource`] trait; the core only consumes
//! `(ssid, bssid, signal)` observations.

pub mod api;
pub mod capture;
pub mod config;
pub mod error;
pub mod logic;

pub use error::{AppError, AppResult};
