//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::logic::ScanError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// Capture collaborator exceeded the configured timeout
    ScanTimeout(String),

    /// Scan was cancelled by the caller
    ScanCancelled,

    /// Collaborator failed or produced malformed output
    ScanFailed(String),

    /// Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ScanTimeout(msg) => {
                tracing::error!("scan timeout: {}", msg);
                (StatusCode::GATEWAY_TIMEOUT, msg.as_str())
            }
            AppError::ScanCancelled => (StatusCode::INTERNAL_SERVER_ERROR, "Scan was cancelled"),
            AppError::ScanFailed(msg) => {
                tracing::error!("scan failed: {}", msg);
                (StatusCode::BAD_GATEWAY, "Failed to scan WiFi networks")
            }
            AppError::InternalError(msg) => {
                tracing::error!("internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<ScanError> for AppError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::Timeout { .. } => AppError::ScanTimeout(err.to_string()),
            ScanError::Cancelled => AppError::ScanCancelled,
            ScanError::Capture(_) | ScanError::Malformed(_) => {
                AppError::ScanFailed(err.to_string())
            }
        }
    }
}
