//! Shared reqwest plumbing: client construction and error mapping.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use studio_core::{Result, StudioError};

/// Builds the shared client. Only connecting is bounded here; request
/// deadlines are set per call so long-lived streams stay open.
pub fn build_client(connect_timeout: Duration) -> Result<Client> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .build()
        .map_err(|e| StudioError::internal(format!("Failed to build HTTP client: {e}")))
}

pub(crate) fn transport_error(err: reqwest::Error) -> StudioError {
    StudioError::network(err.to_string())
}

/// Converts a non-success response into [`StudioError::Http`], keeping the
/// body's `detail` field when there is one.
pub async fn error_from_response(response: Response) -> StudioError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    StudioError::http(status, extract_detail(&body))
}

/// `detail` of a JSON error body. Non-string details (validation error
/// lists) are kept as compact JSON.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Decodes a JSON body after checking the status.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    let bytes = response.bytes().await.map_err(transport_error)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Checks the status and discards the body.
pub(crate) async fn expect_success(response: Response) -> Result<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

/// Reason phrase of an HTTP status (`Internal Server Error`).
pub fn status_text(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}
