//! HTTP response extraction and decoding.

use std::time::Duration;

use hyper::ext::ReasonPhrase;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde_json::Value;

use crate::{
    handlers::error::RelayError,
    protocol::{HeaderList, ResponseDescriptor},
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Collect every response header, in order, duplicates included
pub fn extract_response_headers(headers: &HeaderMap) -> HeaderList {
    headers
        .iter()
        .map(|(name, value)| {
            (name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
        })
        .collect()
}

/// Whether the content type announces a JSON body
pub fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.to_ascii_lowercase().contains(JSON_CONTENT_TYPE))
}

/// Reason phrase the origin sent. hyper only records it when it differs
/// from the canonical one, so the canonical phrase fills in otherwise.
fn reason_phrase(response: &reqwest::Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response.status().canonical_reason().unwrap_or_default().to_string(),
    }
}

/// Read the whole body and build the response descriptor
pub async fn normalize_response(
    response: reqwest::Response,
    timeout: Duration,
) -> Result<ResponseDescriptor, RelayError> {
    let status = response.status();
    let status_text = reason_phrase(&response);
    let headers = extract_response_headers(response.headers());

    let data = if is_json_content(response.headers()) {
        let bytes =
            response.bytes().await.map_err(|error| RelayError::from_reqwest(error, timeout))?;
        serde_json::from_slice::<Value>(&bytes)
            .map_err(|error| RelayError::Decode(error.to_string()))?
    } else {
        Value::String(
            response.text().await.map_err(|error| RelayError::from_reqwest(error, timeout))?,
        )
    };

    Ok(ResponseDescriptor {
        status: status.as_u16(),
        status_text,
        headers,
        data,
    })
}
