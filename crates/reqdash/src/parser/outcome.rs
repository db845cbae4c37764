//! Parse results and warnings.

use thiserror::Error;

use crate::protocol::RequestDescriptor;

/// Something the parser could not use or had to guess about
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    #[error("command does not start with curl (found `{0}`)")]
    MissingCommand(String),

    #[error("no http(s) URL found")]
    MissingUrl,

    #[error("URL `{url}` is not valid: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("ignored additional URL `{0}`")]
    ExtraUrl(String),

    #[error("unterminated {0} quote; the unquoted remainder was dropped")]
    UnterminatedQuote(char),

    #[error("unknown flag `{0}`")]
    UnknownFlag(String),

    #[error("flag `{0}` is not supported and was ignored")]
    UnsupportedFlag(String),

    #[error("flag `{0}` is missing its value")]
    MissingFlagValue(String),

    #[error("header `{0}` is not in `name: value` form")]
    MalformedHeader(String),

    #[error("explicit method `{0}` ignored; method follows payload flags")]
    IgnoredMethod(String),

    #[error("only the first payload flag is used")]
    IgnoredPayload,

    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
}

/// Outcome of parsing command text.
///
/// Both variants carry a usable descriptor; `Partial` also says what was
/// skipped or defaulted along the way.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Complete(RequestDescriptor),
    Partial(RequestDescriptor, Vec<ParseWarning>),
}

impl ParseOutcome {
    pub(crate) fn new(descriptor: RequestDescriptor, warnings: Vec<ParseWarning>) -> Self {
        if warnings.is_empty() {
            ParseOutcome::Complete(descriptor)
        } else {
            ParseOutcome::Partial(descriptor, warnings)
        }
    }

    pub fn descriptor(&self) -> &RequestDescriptor {
        match self {
            ParseOutcome::Complete(descriptor) | ParseOutcome::Partial(descriptor, _) => descriptor,
        }
    }

    pub fn into_descriptor(self) -> RequestDescriptor {
        match self {
            ParseOutcome::Complete(descriptor) | ParseOutcome::Partial(descriptor, _) => descriptor,
        }
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        match self {
            ParseOutcome::Complete(_) => &[],
            ParseOutcome::Partial(_, warnings) => warnings,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, ParseOutcome::Complete(_))
    }
}
