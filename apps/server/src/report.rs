//! JSON report of a parse, shared by the CLI and the parse route.

use reqdash::{ParseOutcome, RequestDescriptor};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ParseReport {
    pub request: RequestDescriptor,
    pub complete: bool,
    pub warnings: Vec<String>,
}

impl From<ParseOutcome> for ParseReport {
    fn from(outcome: ParseOutcome) -> Self {
        let complete = outcome.is_complete();
        let warnings = outcome.warnings().iter().map(ToString::to_string).collect();
        Self { request: outcome.into_descriptor(), complete, warnings }
    }
}
