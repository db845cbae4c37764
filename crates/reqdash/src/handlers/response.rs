//! Relay outcomes.
//!
//! This module provides the per-call state and the result type handed back
//! to whoever exposes the relay.

use std::fmt;

use super::error::RelayError;
use crate::protocol::{ErrorBody, ResponseDescriptor};

/// Stage of a single relay invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayStage {
    Received,
    Validating,
    Rejected,
    Calling,
    Succeeded,
    Failed,
}

impl fmt::Display for RelayStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayStage::Received => write!(f, "received"),
            RelayStage::Validating => write!(f, "validating"),
            RelayStage::Rejected => write!(f, "rejected"),
            RelayStage::Calling => write!(f, "calling"),
            RelayStage::Succeeded => write!(f, "succeeded"),
            RelayStage::Failed => write!(f, "failed"),
        }
    }
}

/// Final result of a relay invocation
#[derive(Debug)]
pub enum RelayOutcome {
    Succeeded(ResponseDescriptor),
    /// The request failed validation and no call was made
    Rejected(RelayError),
    /// The outbound call or its decoding failed
    Failed(RelayError),
}

impl RelayOutcome {
    pub fn stage(&self) -> RelayStage {
        match self {
            RelayOutcome::Succeeded(_) => RelayStage::Succeeded,
            RelayOutcome::Rejected(_) => RelayStage::Rejected,
            RelayOutcome::Failed(_) => RelayStage::Failed,
        }
    }

    /// Status for the relay's own response. The remote status travels
    /// inside the descriptor.
    pub fn status_code(&self) -> u16 {
        match self {
            RelayOutcome::Succeeded(_) => 200,
            RelayOutcome::Rejected(error) | RelayOutcome::Failed(error) => error.status_code(),
        }
    }

    pub fn error(&self) -> Option<&RelayError> {
        match self {
            RelayOutcome::Succeeded(_) => None,
            RelayOutcome::Rejected(error) | RelayOutcome::Failed(error) => Some(error),
        }
    }

    /// Wire body for a rejected or failed call
    pub fn error_body(&self) -> Option<ErrorBody> {
        self.error().map(|error| ErrorBody::new(error.message()))
    }

    pub fn into_result(self) -> Result<ResponseDescriptor, RelayError> {
        match self {
            RelayOutcome::Succeeded(response) => Ok(response),
            RelayOutcome::Rejected(error) | RelayOutcome::Failed(error) => Err(error),
        }
    }
}

/// Build a successful outcome
pub fn build_success_response(response: ResponseDescriptor) -> RelayOutcome {
    RelayOutcome::Succeeded(response)
}

/// Build an outcome for a request that failed validation
pub fn build_rejected_response(error: RelayError) -> RelayOutcome {
    RelayOutcome::Rejected(error)
}

/// Build an outcome for a failed outbound call
pub fn build_error_response(error: RelayError) -> RelayOutcome {
    RelayOutcome::Failed(error)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::protocol::HeaderList;

    #[test]
    fn test_success_is_200_whatever_the_remote_status() {
        let outcome = build_success_response(ResponseDescriptor {
            status: 404,
            status_text: "Not Found".to_string(),
            headers: HeaderList::new(),
            data: json!("missing"),
        });

        assert_eq!(outcome.status_code(), 200);
        assert_eq!(outcome.stage(), RelayStage::Succeeded);
        assert!(outcome.error_body().is_none());
        assert_eq!(outcome.into_result().unwrap().status, 404);
    }

    #[test]
    fn test_rejected_body() {
        let outcome = build_rejected_response(RelayError::MissingUrl);
        assert_eq!(outcome.status_code(), 400);
        assert_eq!(outcome.stage(), RelayStage::Rejected);
        assert_eq!(outcome.error_body(), Some(ErrorBody::new("URL is required")));
    }

    #[test]
    fn test_failed_body() {
        let outcome = build_error_response(RelayError::Cancelled);
        assert_eq!(outcome.status_code(), 500);
        assert_eq!(outcome.stage(), RelayStage::Failed);
        assert_eq!(outcome.error_body(), Some(ErrorBody::new("Request cancelled")));
    }
}
