//! Capture Collaborator
//!
//! The radio-frequency capture is an external collaborator behind a
//! pluggable trait; the pipeline never talks to wireless hardware. The
//! default implementation shells out to a scanner command and parses its
//! stdout, but tests inject their own sources.

pub mod process;

use thiserror::Error;

pub use process::ProcessCapture;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to spawn scanner: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("scanner exited with {code}: {stderr}")]
    ScannerFailed { code: i32, stderr: String },
    #[error("scanner produced malformed output: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}

/// One capture invocation per scan request. Returns the raw JSON payload;
/// validation happens in ingest.
#[axum::async_trait]
pub trait CaptureSource: Send + Sync {
    async fn capture(&self) -> Result<serde_json::Value, CaptureError>;
}
