//! Process-backed capture source.
//!
//! Spawns the configured scanner command once per scan and parses its
//! stdout as a JSON list of raw observations. Diagnostic text on stderr
//! is surfaced with a non-zero exit.

use tokio::process::Command;

use super::{CaptureError, CaptureSource};

pub struct ProcessCapture {
    program: String,
    args: Vec<String>,
}

impl ProcessCapture {
    /// Build from a whitespace-separated command line, e.g.
    /// `"python3 scripts/wifi_scanner.py"`.
    pub fn from_command_line(command: &str) -> Self {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_default();
        Self {
            program,
            args: parts.collect(),
        }
    }
}

#[axum::async_trait]
impl CaptureSource for ProcessCapture {
    async fn capture(&self) -> Result<serde_json::Value, CaptureError> {
        tracing::debug!("invoking scanner: {} {:?}", self.program, self.args);

        let output = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            return Err(CaptureError::ScannerFailed { code, stderr });
        }

        let payload = serde_json::from_slice(&output.stdout)?;
        Ok(payload)
    }
}
