//! API error types and message normalization.

use serde_json::Value;

/// Failure of a single API call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Cannot reach backend at {0}")]
    Connection(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("request failed"))]
    Http { status: u16, message: Option<String> },
    #[error("Invalid response: {0}")]
    Decode(String),
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl ApiError {
    /// Human-readable message supplied by the backend (`{"message": ...}`).
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.trim()),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build an HTTP error from a raw error body.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<Value>(body).ok().and_then(|json| {
            json.get("message")
                .or_else(|| json.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
        });
        Self::Http { status, message }
    }
}

/// Turn an API failure into the string stored in a slice's `error` field.
///
/// Prefers the server message; otherwise uses `fallback`. Never empty.
pub fn normalize_error(err: &ApiError, fallback: &str) -> String {
    match err.server_message() {
        Some(message) => message.to_string(),
        None if fallback.trim().is_empty() => "Something went wrong".to_string(),
        None => fallback.to_string(),
    }
}
