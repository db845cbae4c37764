//! Protocol module for reqdash.
//!
//! This module contains the descriptor types and the JSON wire codec.

pub mod codec;
pub mod headers;
pub mod types;

pub use codec::{decode_request, encode_payload, ErrorBody};
pub use headers::HeaderList;
pub use types::{HttpMethod, RequestDescriptor, ResponseDescriptor};
