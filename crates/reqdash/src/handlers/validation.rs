//! Request validation for the relay.
//!
//! Only the URL is checked for presence. Malformed URLs, methods or headers
//! are left for the outbound call to reject.

use super::error::RelayError;
use crate::protocol::RequestDescriptor;

/// Validate a relay request
pub fn validate_relay_request(request: &RequestDescriptor) -> Result<(), RelayError> {
    if request.url.is_empty() {
        return Err(RelayError::MissingUrl);
    }

    Ok(())
}
