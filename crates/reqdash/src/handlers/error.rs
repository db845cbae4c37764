//! Relay error type.

use std::{error::Error as StdError, time::Duration};

use thiserror::Error;

/// Message used when a failure has no description of its own
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Request cancelled")]
    Cancelled,

    #[error("{0}")]
    Request(#[source] reqwest::Error),

    #[error("Failed to decode response body: {0}")]
    Decode(String),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl RelayError {
    /// Classify a client error raised while sending or reading a response
    pub fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            RelayError::Timeout(timeout)
        } else if error.is_decode() {
            RelayError::Decode(describe_chain(&error))
        } else {
            RelayError::Request(error)
        }
    }

    /// Stable identifier for callers that branch on the failure kind
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::MissingUrl => "missing_url",
            RelayError::InvalidMethod(_) => "invalid_method",
            RelayError::Timeout(_) => "timeout",
            RelayError::Cancelled => "cancelled",
            RelayError::Request(_) => "upstream_request",
            RelayError::Decode(_) => "decode",
            RelayError::Encode(_) => "encode",
            RelayError::Client(_) => "client",
        }
    }

    /// HTTP status the relay answers with for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::MissingUrl => 400,
            _ => 500,
        }
    }

    /// Human readable message including the underlying causes
    pub fn message(&self) -> String {
        let message = describe_chain(self);
        if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Join an error and its sources with `": "`, skipping repeated text
fn describe_chain(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
