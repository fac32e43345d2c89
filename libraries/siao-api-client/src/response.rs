//! Status mapping and body decoding shared by every endpoint.

use crate::error::{ApiClientError, Result};
use crate::types::ApiEnvelope;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Read a response body as `T`, or map its status to an error.
///
/// `what` names the payload in parse errors.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        let body = response.text().await.map_err(ApiClientError::from_send)?;
        decode(&body, what)
    } else {
        // The status alone decides the error; the body only adds a message.
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }
}

/// Decode a payload that may or may not be wrapped in an [`ApiEnvelope`].
///
/// A top-level object with a `data` key is an envelope; anything else is the
/// payload itself.
pub(crate) fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    let parse_error = |e: serde_json::Error| {
        ApiClientError::Parse(format!("Failed to parse {what} response: {e}"))
    };

    let value: Value = serde_json::from_str(body).map_err(parse_error)?;
    let wrapped = matches!(&value, Value::Object(map) if map.contains_key("data"));
    if !wrapped {
        return serde_json::from_value(value).map_err(parse_error);
    }

    let envelope: ApiEnvelope<T> = serde_json::from_value(value).map_err(parse_error)?;
    if envelope.success == Some(false) {
        return Err(ApiClientError::Rejected(
            envelope.message.unwrap_or_else(|| "no message".to_string()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| ApiClientError::Parse(format!("{what} response carried no data")))
}

/// Error for a non-success status
pub(crate) fn status_error(status: StatusCode, body: &str) -> ApiClientError {
    match status {
        StatusCode::UNAUTHORIZED => ApiClientError::AuthRequired,
        StatusCode::FORBIDDEN => ApiClientError::Forbidden,
        StatusCode::NOT_FOUND => ApiClientError::NotFound,
        _ => ApiClientError::Server {
            status: status.as_u16(),
            message: error_message(body),
        },
    }
}

/// `message` field of a JSON error body, else the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
