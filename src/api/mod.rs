//! Clinic backend API client.
//!
//! `ApiTransport` is the only boundary between the client core and the
//! network. `HttpApiClient` talks to the real backend with a cookie-backed
//! session; `MockApiClient` replays scripted responses for tests.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod mock;
pub mod request;

use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use client::HttpApiClient;
pub use error::{normalize_error, ApiError};
pub use mock::MockApiClient;
pub use request::{ApiRequest, FilePart, MultipartBody, RequestBody};

/// Issues one request and yields the parsed JSON body.
pub trait ApiTransport: Send + Sync {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<Value, ApiError>> + Send;
}

/// Decode a payload that may be wrapped in a named envelope field.
///
/// The backend answers either `{"<field>": payload, ...}` or the bare
/// payload; both are accepted.
pub fn unwrap_envelope<T: DeserializeOwned>(body: Value, field: &str) -> Result<T, ApiError> {
    let payload = match body {
        Value::Object(mut map) if map.contains_key(field) => map.remove(field).unwrap_or(Value::Null),
        other => other,
    };
    serde_json::from_value(payload).map_err(|e| ApiError::Decode(format!("{field}: {e}")))
}

/// Server-supplied `message` field of a successful response, if any.
pub fn response_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
