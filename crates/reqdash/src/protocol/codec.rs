//! JSON codec for the relay boundary.
//!
//! Decodes incoming relay bodies into descriptors and encodes the payload and
//! error bodies that cross the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::RequestDescriptor;

/// Error body returned by the relay on rejection or failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Decode a relay request body
pub fn decode_request(bytes: &[u8]) -> serde_json::Result<RequestDescriptor> {
    serde_json::from_slice(bytes)
}

/// Serialize a payload to the JSON text sent to the remote origin.
///
/// Strings are encoded as JSON strings, quotes included.
pub fn encode_payload(data: &Value) -> serde_json::Result<String> {
    serde_json::to_string(data)
}
