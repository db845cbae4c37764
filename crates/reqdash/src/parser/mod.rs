//! Curl command parsing for reqdash.
//!
//! Turns pasted command text into a [`RequestDescriptor`]. Parsing never
//! fails: anything the parser cannot use falls back to the descriptor
//! defaults and is reported as a [`ParseWarning`].
//!
//! ```
//! use reqdash::parser::parse;
//!
//! let request = parse("curl https://api.example.com/users");
//! assert_eq!(request.url, "https://api.example.com/users");
//! assert_eq!(request.method.as_str(), "GET");
//! ```

mod command;
mod outcome;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

pub use outcome::{ParseOutcome, ParseWarning};

use crate::protocol::RequestDescriptor;

/// How the request method is derived from the command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MethodInference {
    /// `-X`/`--request` wins, then `-I`, then `POST` when a payload flag is
    /// present, else `GET`
    #[default]
    #[serde(alias = "explicit")]
    ExplicitOverride,

    /// Method comes from payload presence alone (`POST` with a payload,
    /// `GET` without). Explicit method flags are ignored and only the first
    /// payload flag is used.
    PayloadOnly,
}

/// Parser configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserOptions {
    pub method_inference: MethodInference,
}

impl ParserOptions {
    /// Options reproducing the payload-only method rule
    pub fn payload_only() -> Self {
        Self { method_inference: MethodInference::PayloadOnly }
    }

    pub fn with_method_inference(mut self, method_inference: MethodInference) -> Self {
        self.method_inference = method_inference;
        self
    }
}

/// Parse command text with default options, keeping only the descriptor.
///
/// The default honours `-X` and `-I`, so `curl -I URL` gives `HEAD` and
/// `curl -X GET URL --data x` gives `GET`. Use [`parse_with`] and
/// [`ParserOptions::payload_only`] when the method must follow payload
/// presence alone.
pub fn parse(text: &str) -> RequestDescriptor {
    parse_command(text).into_descriptor()
}

/// Parse command text with default options; see [`parse`] for the method rule
pub fn parse_command(text: &str) -> ParseOutcome {
    parse_with(text, &ParserOptions::default())
}

/// Parse command text with explicit options
pub fn parse_with(text: &str, options: &ParserOptions) -> ParseOutcome {
    command::parse_command_text(text, options)
}
