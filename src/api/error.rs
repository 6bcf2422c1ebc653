//! Typed errors for backend calls
//!
//! Every failure a façade can produce is normalized into [`ApiError`] so the
//! lifecycle layer only has to turn it into a message.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Backend call errors with typed variants
///
/// - `Transport` - connection refused, DNS, timeout; no response was received
/// - `HttpStatus` - the backend answered with a non-2xx status
/// - `Decode` - a 2xx body did not match the expected shape
/// - `Encode` - the request body could not be serialized
/// - `Validation` - rejected client-side, no request was sent
/// - `InvalidUrl` - the configured base URL is unusable
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    /// Displays as the bare message, which is what ends up in the UI.
    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to encode request body: {0}")]
    Encode(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Error body shape returned by the backends: `{ "error": "..." }`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ApiError {
    /// Build an error from a non-success status and the raw response body
    ///
    /// Uses the `error` field of a JSON body when present and non-empty,
    /// otherwise the canonical status text. The message is never empty.
    pub fn from_http_status(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| status_text(status));

        ApiError::HttpStatus {
            status: status.as_u16(),
            message,
        }
    }

    /// Convert network/connection errors into typed ApiError
    pub fn from_network_error(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Transport(format!("Request timeout: {}", e))
        } else if e.is_connect() {
            ApiError::Transport(format!("Connection failed: {}", e))
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }

    /// HTTP status code, when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the request never left the client
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            ApiError::Validation(_) | ApiError::Encode(_) | ApiError::InvalidUrl(_)
        )
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
