//! Outbound HTTP for the relay.
//!
//! This module sends relay requests and normalizes the responses.

mod extract;
mod request;

pub use extract::{extract_response_headers, is_json_content, normalize_response};
pub use request::Relay;
