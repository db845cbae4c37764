//! Curl flag grammar.
//!
//! Words produced by the tokenizer are consumed by a small state machine:
//! the command keyword is located first, then options and positionals are
//! read until the end of input, with value-taking flags switching the machine
//! into a state that expects exactly one value.

use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{
    outcome::{ParseOutcome, ParseWarning},
    tokenizer::tokenize,
    MethodInference, ParserOptions,
};
use crate::protocol::{HeaderList, HttpMethod, RequestDescriptor};

/// Payload segments are joined this way when a payload flag repeats
const PAYLOAD_SEPARATOR: &str = "&";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Header,
    Data,
    Json,
    Method,
    Head,
    Url,
    UserAgent,
    Referer,
    Cookie,
    /// Recognised, irrelevant to the request, no value
    Switch,
    /// Recognised, irrelevant to the request, takes a value
    Skip,
    /// Recognised but outside what a descriptor can express
    Unsupported,
}

impl Flag {
    fn takes_value(self) -> bool {
        !matches!(self, Flag::Head | Flag::Switch)
    }
}

fn lookup_long(name: &str) -> Option<Flag> {
    let flag = match name {
        "--header" => Flag::Header,
        "--data" | "--data-raw" | "--data-binary" | "--data-ascii" => Flag::Data,
        "--json" => Flag::Json,
        "--request" => Flag::Method,
        "--head" => Flag::Head,
        "--url" => Flag::Url,
        "--user-agent" => Flag::UserAgent,
        "--referer" => Flag::Referer,
        "--cookie" => Flag::Cookie,
        "--location" | "--silent" | "--show-error" | "--insecure" | "--include" | "--verbose"
        | "--compressed" | "--globoff" | "--fail" | "--no-buffer" | "--http1.0" | "--http1.1"
        | "--http2" | "--http3" | "--progress-bar" | "--no-progress-meter" => Flag::Switch,
        "--output" | "--max-time" | "--connect-timeout" | "--retry" | "--write-out"
        | "--proxy" | "--cookie-jar" | "--cacert" | "--max-redirs" | "--resolve"
        | "--limit-rate" | "--interface" => Flag::Skip,
        "--user" | "--form" | "--data-urlencode" | "--upload-file" | "--cert" | "--key"
        | "--oauth2-bearer" => Flag::Unsupported,
        _ => return None,
    };
    Some(flag)
}

fn lookup_short(name: char) -> Option<Flag> {
    let flag = match name {
        'H' => Flag::Header,
        'd' => Flag::Data,
        'X' => Flag::Method,
        'I' => Flag::Head,
        'A' => Flag::UserAgent,
        'e' => Flag::Referer,
        'b' => Flag::Cookie,
        'L' | 's' | 'S' | 'k' | 'i' | 'v' | 'g' | 'f' | 'N' | '#' => Flag::Switch,
        'o' | 'm' | 'w' | 'x' | 'c' => Flag::Skip,
        'u' | 'F' | 'T' | 'E' => Flag::Unsupported,
        _ => return None,
    };
    Some(flag)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    /// Skipping words until the command keyword
    ExpectCommand,
    Options,
    /// The previous word was a flag that needs a value
    FlagValue { flag: Flag, spelled: String },
    /// After `--`, everything is positional
    Positionals,
}

/// Fields collected while walking the words
#[derive(Debug, Default)]
struct Collector {
    url: Option<String>,
    headers: HeaderList,
    payload: Vec<String>,
    json_payload: bool,
    explicit_method: Option<String>,
    head: bool,
    warnings: Vec<ParseWarning>,
}

impl Collector {
    /// Only the first URL counts
    fn set_url(&mut self, url: String) {
        if self.url.is_some() {
            self.warnings.push(ParseWarning::ExtraUrl(url));
        } else {
            self.url = Some(url);
        }
    }
}

struct Machine<'a> {
    options: &'a ParserOptions,
    state: State,
    fields: Collector,
}

impl<'a> Machine<'a> {
    fn new(options: &'a ParserOptions, expect_command: bool) -> Self {
        let state = if expect_command { State::ExpectCommand } else { State::Options };
        Self { options, state, fields: Collector::default() }
    }

    fn feed(&mut self, word: String) {
        match std::mem::replace(&mut self.state, State::Options) {
            State::ExpectCommand => {
                if !is_command(&word) {
                    self.state = State::ExpectCommand;
                }
            }
            State::FlagValue { flag, spelled } => self.apply(flag, &spelled, Some(word)),
            State::Positionals => {
                self.state = State::Positionals;
                self.positional(word);
            }
            State::Options => self.option_or_positional(word),
        }
    }

    fn finish(mut self) -> Collector {
        if let State::FlagValue { spelled, .. } = &self.state {
            self.fields.warnings.push(ParseWarning::MissingFlagValue(spelled.clone()));
        }
        self.fields
    }

    fn option_or_positional(&mut self, word: String) {
        if word == "--" {
            self.state = State::Positionals;
        } else if word.starts_with("--") {
            self.long_flag(&word);
        } else if word.len() > 1 && word.starts_with('-') {
            self.short_flags(&word);
        } else {
            self.positional(word);
        }
    }

    fn long_flag(&mut self, word: &str) {
        let (name, attached) = match word.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (word, None),
        };

        let Some(flag) = lookup_long(name) else {
            self.fields.warnings.push(ParseWarning::UnknownFlag(name.to_string()));
            return;
        };

        if flag.takes_value() && attached.is_none() {
            self.state = State::FlagValue { flag, spelled: name.to_string() };
        } else {
            self.apply(flag, name, attached);
        }
    }

    /// Short flags may be clustered (`-sSL`) and may carry their value
    /// directly (`-XPUT`).
    fn short_flags(&mut self, word: &str) {
        let mut rest = word[1..].chars();
        while let Some(name) = rest.next() {
            let spelled = format!("-{name}");
            let Some(flag) = lookup_short(name) else {
                self.fields.warnings.push(ParseWarning::UnknownFlag(spelled));
                return;
            };

            if !flag.takes_value() {
                self.apply(flag, &spelled, None);
                continue;
            }

            let attached = rest.as_str().to_string();
            if attached.is_empty() {
                self.state = State::FlagValue { flag, spelled };
            } else {
                self.apply(flag, &spelled, Some(attached));
            }
            return;
        }
    }

    fn apply(&mut self, flag: Flag, spelled: &str, value: Option<String>) {
        let payload_only = self.options.method_inference == MethodInference::PayloadOnly;
        let fields = &mut self.fields;

        match (flag, value) {
            (Flag::Head, _) if payload_only => {
                fields.warnings.push(ParseWarning::IgnoredMethod(HttpMethod::Head.to_string()));
            }
            (Flag::Head, _) => fields.head = true,
            (Flag::Switch, _) => {}
            (_, None) => fields.warnings.push(ParseWarning::MissingFlagValue(spelled.to_string())),
            (Flag::Header, Some(raw)) => match split_header(&raw) {
                Some((name, value)) => fields.headers.append(name, value),
                None => fields.warnings.push(ParseWarning::MalformedHeader(raw)),
            },
            (Flag::Data | Flag::Json, Some(_)) if payload_only && !fields.payload.is_empty() => {
                fields.warnings.push(ParseWarning::IgnoredPayload);
            }
            (Flag::Data, Some(segment)) => fields.payload.push(segment),
            (Flag::Json, Some(segment)) => {
                fields.json_payload = true;
                fields.payload.push(segment);
            }
            (Flag::Method, Some(method)) if payload_only => {
                fields.warnings.push(ParseWarning::IgnoredMethod(method));
            }
            (Flag::Method, Some(method)) => fields.explicit_method = Some(method),
            (Flag::Url, Some(url)) => fields.set_url(url),
            (Flag::UserAgent, Some(agent)) => fields.headers.append("User-Agent", agent),
            (Flag::Referer, Some(referer)) => fields.headers.append("Referer", referer),
            (Flag::Cookie, Some(cookie)) => fields.headers.append("Cookie", cookie),
            (Flag::Skip, Some(_)) => {}
            (Flag::Unsupported, Some(_)) => {
                fields.warnings.push(ParseWarning::UnsupportedFlag(spelled.to_string()));
            }
        }
    }

    fn positional(&mut self, word: String) {
        if is_http_url(&word) {
            self.fields.set_url(word);
        } else {
            self.fields.warnings.push(ParseWarning::UnexpectedArgument(word));
        }
    }
}

fn is_command(word: &str) -> bool {
    let basename = word.rsplit(['/', '\\']).next().unwrap_or(word);
    basename == "curl" || basename.eq_ignore_ascii_case("curl.exe")
}

fn is_http_url(word: &str) -> bool {
    let lower = word.get(..8).unwrap_or(word).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Split `name: value` on the first `": "`, falling back to the first `:`
fn split_header(raw: &str) -> Option<(String, String)> {
    let (name, value) = raw.split_once(": ").or_else(|| raw.split_once(':'))?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}

/// JSON when the text parses as JSON, the text itself otherwise
fn decode_payload(text: String) -> Option<Value> {
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(text)),
    }
}

fn infer_method(fields: &Collector, inference: MethodInference) -> HttpMethod {
    let has_payload = !fields.payload.is_empty();
    match inference {
        MethodInference::PayloadOnly if has_payload => HttpMethod::Post,
        MethodInference::PayloadOnly => HttpMethod::Get,
        MethodInference::ExplicitOverride => match &fields.explicit_method {
            Some(method) => HttpMethod::from(method.as_str()),
            None if fields.head => HttpMethod::Head,
            None if has_payload => HttpMethod::Post,
            None => HttpMethod::Get,
        },
    }
}

/// Parse command text into a descriptor plus warnings
pub(crate) fn parse_command_text(text: &str, options: &ParserOptions) -> ParseOutcome {
    let tokens = tokenize(text);
    let mut warnings = Vec::new();

    let expect_command = tokens.words.iter().any(|word| is_command(word));
    if !expect_command {
        if let Some(first) = tokens.words.first() {
            warnings.push(ParseWarning::MissingCommand(first.clone()));
        }
    }

    let mut machine = Machine::new(options, expect_command);
    for word in tokens.words {
        machine.feed(word);
    }
    let mut fields = machine.finish();

    if let Some(quote) = tokens.unterminated_quote {
        warnings.push(ParseWarning::UnterminatedQuote(quote));
    }

    let method = infer_method(&fields, options.method_inference);

    if fields.json_payload {
        for name in ["Content-Type", "Accept"] {
            if !fields.headers.contains_ignore_case(name) {
                fields.headers.append(name, "application/json");
            }
        }
    }

    let data = if fields.payload.is_empty() {
        None
    } else {
        decode_payload(fields.payload.join(PAYLOAD_SEPARATOR))
    };

    let url = fields.url.unwrap_or_default();
    if url.is_empty() {
        warnings.push(ParseWarning::MissingUrl);
    } else if let Err(error) = Url::parse(&url) {
        warnings.push(ParseWarning::InvalidUrl { url: url.clone(), reason: error.to_string() });
    }

    warnings.append(&mut fields.warnings);
    debug!(%method, url = %url, warnings = warnings.len(), "parsed command");

    ParseOutcome::new(RequestDescriptor { url, method, headers: fields.headers, data }, warnings)
}
