//! reqdash - turn curl commands into editable requests and relay them
//!
//! This library provides the curl command parser, the relay that executes
//! request descriptors against remote origins, and the saved-request store
//! used by front ends.

pub mod handlers;
pub mod parser;
pub mod protocol;
pub mod store;

// Re-export main types
pub use handlers::{Relay, RelayConfig, RelayError, RelayOutcome};
pub use parser::{parse, parse_command, parse_with, ParseOutcome, ParseWarning, ParserOptions};
pub use protocol::{HeaderList, HttpMethod, RequestDescriptor, ResponseDescriptor};
pub use store::{FileStore, MemoryStore, RequestStore, SavedRequest, StoreError};
