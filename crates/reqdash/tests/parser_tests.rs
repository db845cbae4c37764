//! Tests for curl command parsing

use reqdash::{
    parser::{parse, parse_command, parse_with, MethodInference, ParseWarning, ParserOptions},
    protocol::{HttpMethod, RequestDescriptor},
};
use serde_json::{json, Value};

#[test]
fn test_plain_get() {
    let outcome = parse_command("curl https://api.example.com/users");

    assert!(outcome.is_complete());
    assert_eq!(
        outcome.into_descriptor(),
        RequestDescriptor {
            url: "https://api.example.com/users".to_string(),
            method: HttpMethod::Get,
            headers: Default::default(),
            data: None,
        }
    );
}

#[test]
fn test_post_with_header_and_json_data() {
    let request = parse(concat!(
        "curl https://api.example.com/users ",
        r#"-H "Content-Type: application/json" --data '{"name":"Bob"}'"#,
    ));

    assert_eq!(request.url, "https://api.example.com/users");
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.headers.get("Content-Type"), Some("application/json"));
    assert_eq!(request.data, Some(json!({"name": "Bob"})));

    let wire = serde_json::to_value(&request).unwrap();
    assert_eq!(
        wire,
        json!({
            "url": "https://api.example.com/users",
            "method": "POST",
            "headers": {"Content-Type": "application/json"},
            "data": {"name": "Bob"},
        })
    );
}

#[test]
fn test_quoted_url_is_unquoted() {
    assert_eq!(parse("curl 'https://a.example/x?y=1&z=2'").url, "https://a.example/x?y=1&z=2");
    assert_eq!(parse(r#"curl "http://a.example/""#).url, "http://a.example/");
}

#[test]
fn test_data_raw_forces_post() {
    assert_eq!(parse("curl https://a.example --data-raw 'x'").method, HttpMethod::Post);
    assert_eq!(parse("curl https://a.example -d 'x'").method, HttpMethod::Post);
    assert_eq!(parse("curl https://a.example -H 'Accept: */*'").method, HttpMethod::Get);
}

#[test]
fn test_headers_are_trimmed_and_counted() {
    let request = parse(
        "curl https://a.example -H 'Accept:   text/html  ' -H \"X-Trace: 1\" \
         --header 'X-Other: two'",
    );

    assert_eq!(request.headers.len(), 3);
    assert_eq!(request.headers.get("Accept"), Some("text/html"));
    assert_eq!(request.headers.get("X-Trace"), Some("1"));
    assert_eq!(request.headers.get("X-Other"), Some("two"));
}

#[test]
fn test_repeated_header_last_wins_on_lookup() {
    let request = parse("curl https://a.example -H 'X-A: 1' -H 'X-A: 2'");

    assert_eq!(request.headers.get("X-A"), Some("2"));
    assert_eq!(request.headers.get_all("X-A").count(), 2);
    assert_eq!(serde_json::to_value(&request.headers).unwrap(), json!({"X-A": "2"}));
}

#[test]
fn test_non_json_payload_kept_verbatim() {
    let request = parse("curl https://a.example --data 'name=Bob&age=3'");
    assert_eq!(request.data, Some(Value::String("name=Bob&age=3".to_string())));
}

#[test]
fn test_no_payload_is_none() {
    assert_eq!(parse("curl https://a.example").data, None);
}

#[test]
fn test_missing_url_defaults() {
    let outcome = parse_command("curl -H 'Accept: */*'");

    assert!(!outcome.is_complete());
    assert!(outcome.warnings().contains(&ParseWarning::MissingUrl));
    assert_eq!(outcome.descriptor().url, "");
    assert_eq!(outcome.descriptor().method, HttpMethod::Get);
}

#[test]
fn test_empty_text_is_default_descriptor() {
    let outcome = parse_command("");
    assert_eq!(outcome.descriptor(), &RequestDescriptor::default());
    assert_eq!(outcome.warnings(), &[ParseWarning::MissingUrl]);
}

#[test]
fn test_unbalanced_quote_leaves_defaults() {
    let outcome = parse_command("curl 'https://a.example/users");

    assert_eq!(outcome.descriptor().url, "");
    assert!(outcome.warnings().contains(&ParseWarning::UnterminatedQuote('\'')));
}

#[test]
fn test_explicit_method_wins_by_default() {
    assert_eq!(parse("curl -X PUT https://a.example --data '{}'").method, HttpMethod::Put);
    assert_eq!(parse("curl -XDELETE https://a.example").method, HttpMethod::Delete);
    assert_eq!(parse("curl --request=patch https://a.example").method, HttpMethod::Patch);
    assert_eq!(parse("curl -I https://a.example").method, HttpMethod::Head);
}

#[test]
fn test_payload_only_ignores_explicit_method() {
    let options = ParserOptions::payload_only();

    let outcome = parse_with("curl -X PUT https://a.example --data '{}'", &options);
    assert_eq!(outcome.descriptor().method, HttpMethod::Post);
    assert!(outcome.warnings().contains(&ParseWarning::IgnoredMethod("PUT".to_string())));

    let outcome = parse_with("curl -X DELETE https://a.example", &options);
    assert_eq!(outcome.descriptor().method, HttpMethod::Get);
}

#[test]
fn test_repeated_payloads_join_with_ampersand() {
    let request = parse("curl https://a.example -d a=1 -d b=2");
    assert_eq!(request.data, Some(json!("a=1&b=2")));
}

#[test]
fn test_payload_only_keeps_first_payload() {
    let options = ParserOptions::default().with_method_inference(MethodInference::PayloadOnly);
    let outcome =
        parse_with(r#"curl https://a.example --data '{"a":1}' --data '{"b":2}'"#, &options);

    assert_eq!(outcome.descriptor().data, Some(json!({"a": 1})));
    assert!(outcome.warnings().contains(&ParseWarning::IgnoredPayload));
}

#[test]
fn test_json_flag_adds_content_headers() {
    let request = parse(r#"curl --json '{"a":1}' https://a.example"#);

    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.data, Some(json!({"a": 1})));
    assert_eq!(request.headers.get("Content-Type"), Some("application/json"));
    assert_eq!(request.headers.get("Accept"), Some("application/json"));

    let request = parse(r#"curl --json '{}' -H 'content-type: text/x' https://a.example"#);
    assert_eq!(request.headers.get_all("content-type").collect::<Vec<_>>(), vec!["text/x"]);
    assert_eq!(request.headers.get("Content-Type"), None);
}

#[test]
fn test_multiline_browser_copy() {
    let text = concat!(
        "curl 'https://a.example/api' \\\n",
        "  -H 'accept: application/json' \\\n",
        "  -H 'user-agent: Mozilla/5.0' \\\n",
        "  --data-raw $'{\"note\":\"it\\'s\"}' \\\n",
        "  --compressed",
    );
    let outcome = parse_command(text);

    assert!(outcome.is_complete(), "unexpected warnings: {:?}", outcome.warnings());
    let request = outcome.descriptor();
    assert_eq!(request.url, "https://a.example/api");
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.headers.len(), 2);
    assert_eq!(request.data, Some(json!({"note": "it's"})));
}

#[test]
fn test_clustered_switches_and_shorthand_headers() {
    let request = parse("curl -sSL -A 'agent/1' -e https://ref.example -b 'k=v' https://a.example");

    assert_eq!(request.url, "https://a.example");
    assert_eq!(request.headers.get("User-Agent"), Some("agent/1"));
    assert_eq!(request.headers.get("Referer"), Some("https://ref.example"));
    assert_eq!(request.headers.get("Cookie"), Some("k=v"));
}

#[test]
fn test_url_flag_and_extra_urls() {
    let outcome = parse_command("curl --url https://first.example https://second.example");

    assert_eq!(outcome.descriptor().url, "https://first.example");
    assert!(outcome
        .warnings()
        .contains(&ParseWarning::ExtraUrl("https://second.example".to_string())));
}

#[test]
fn test_unknown_and_unsupported_flags_warn() {
    let outcome = parse_command("curl --frobnicate -u user:pass https://a.example");

    assert_eq!(outcome.descriptor().url, "https://a.example");
    let warnings = outcome.warnings();
    assert!(warnings.contains(&ParseWarning::UnknownFlag("--frobnicate".to_string())));
    assert!(warnings.contains(&ParseWarning::UnsupportedFlag("-u".to_string())));
}

#[test]
fn test_missing_flag_value_and_malformed_header() {
    let outcome = parse_command("curl https://a.example -H 'no-colon' -H");
    let warnings = outcome.warnings();

    assert!(warnings.contains(&ParseWarning::MalformedHeader("no-colon".to_string())));
    assert!(warnings.contains(&ParseWarning::MissingFlagValue("-H".to_string())));
    assert!(outcome.descriptor().headers.is_empty());
}

#[test]
fn test_missing_command_still_scans() {
    let outcome = parse_command("https://a.example -H 'Accept: x'");

    assert_eq!(outcome.descriptor().url, "https://a.example");
    assert!(outcome
        .warnings()
        .contains(&ParseWarning::MissingCommand("https://a.example".to_string())));
}

#[test]
fn test_invalid_url_is_kept() {
    let outcome = parse_command("curl http://exa mple");
    assert_eq!(outcome.descriptor().url, "http://exa");

    let outcome = parse_command("curl 'http://[bad'");
    assert_eq!(outcome.descriptor().url, "http://[bad");
    assert!(matches!(outcome.warnings()[0], ParseWarning::InvalidUrl { .. }));
}

#[test]
fn test_double_dash_ends_options() {
    let outcome = parse_command("curl -- -notaflag https://a.example");

    assert_eq!(outcome.descriptor().url, "https://a.example");
    assert!(outcome
        .warnings()
        .contains(&ParseWarning::UnexpectedArgument("-notaflag".to_string())));
}

#[test]
fn test_method_rules_differ_only_on_explicit_flags() {
    let payload_only = ParserOptions::payload_only();

    assert_eq!(parse("curl -I https://a.example").method, HttpMethod::Head);
    assert_eq!(
        parse_with("curl -I https://a.example", &payload_only).descriptor().method,
        HttpMethod::Get
    );

    assert_eq!(parse("curl -X GET https://a.example --data x").method, HttpMethod::Get);
    assert_eq!(
        parse_with("curl -X GET https://a.example --data x", &payload_only).descriptor().method,
        HttpMethod::Post
    );
}
