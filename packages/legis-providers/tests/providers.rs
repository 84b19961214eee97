use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};

use legis_providers::completion::{SseDecoder, SseEvent};

#[test]
fn builds_bearer_auth_header() {
	let headers =
		legis_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-retries".to_string(), Value::from(3));

	assert!(legis_providers::auth_headers("secret", &defaults).is_err());
}

#[test]
fn decoder_joins_lines_split_across_chunks() {
	let line = "data: {\"choices\":[{\"delta\":{\"content\":\"Employers’ duty\"}}]}\n\n";
	let bytes = line.as_bytes();
	// Split inside the three-byte apostrophe.
	let split = line.find('’').expect("Missing apostrophe.") + 1;
	let mut decoder = SseDecoder::default();
	let first = decoder.push(&bytes[..split]).expect("Decode failed.");
	let second = decoder.push(&bytes[split..]).expect("Decode failed.");

	assert!(first.is_empty());
	assert_eq!(second, vec![SseEvent::Delta("Employers’ duty".to_string())]);
}

#[test]
fn decoder_reports_done_and_trailing_line() {
	let mut decoder = SseDecoder::default();
	let events = decoder
		.push(b"data: {\"choices\":[{\"delta\":{}}]}\ndata: [DONE]")
		.expect("Decode failed.");

	assert_eq!(events, vec![SseEvent::Delta(String::new())]);
	assert_eq!(decoder.finish().expect("Decode failed."), vec![SseEvent::Done]);
}

#[test]
fn decoder_rejects_malformed_json() {
	let mut decoder = SseDecoder::default();

	assert!(decoder.push(b"data: {not json}\n").is_err());
}
