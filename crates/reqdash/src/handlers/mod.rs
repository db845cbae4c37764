//! Relay handlers for reqdash.
//!
//! This module contains the relay that executes request descriptors and
//! returns normalized response descriptors.

pub mod config;
pub mod error;
pub mod http;
pub mod response;
pub mod validation;

pub use config::RelayConfig;
pub use error::RelayError;
pub use http::Relay;
pub use response::{
    build_error_response, build_rejected_response, build_success_response, RelayOutcome,
    RelayStage,
};
pub use validation::validate_relay_request;
