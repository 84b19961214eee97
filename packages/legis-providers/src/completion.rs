//! OpenAI-compatible chat completions, whole and streamed over server-sent events.

use std::{collections::VecDeque, time::Duration};

use color_eyre::{Result, eyre};
use futures::{
	StreamExt,
	stream::{self, BoxStream},
};
use reqwest::Client;
use serde_json::Value;

use legis_config::LlmProviderConfig;

pub type FragmentStream = BoxStream<'static, Result<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
	Delta(String),
	Done,
}

/// Splits a byte stream into SSE `data:` events. Bytes are buffered until a full line arrives
/// so multi-byte characters split across chunks survive.
#[derive(Debug, Default)]
pub struct SseDecoder {
	buffer: Vec<u8>,
}
impl SseDecoder {
	pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<SseEvent>> {
		self.buffer.extend_from_slice(chunk);

		let mut events = Vec::new();

		while let Some(pos) = self.buffer.iter().position(|byte| *byte == b'\n') {
			let line: Vec<u8> = self.buffer.drain(..=pos).collect();

			if let Some(event) = parse_stream_line(&String::from_utf8_lossy(&line))? {
				events.push(event);
			}
		}

		Ok(events)
	}

	pub fn finish(&mut self) -> Result<Vec<SseEvent>> {
		let rest = std::mem::take(&mut self.buffer);

		if rest.is_empty() {
			return Ok(Vec::new());
		}

		Ok(parse_stream_line(&String::from_utf8_lossy(&rest))?.into_iter().collect())
	}
}

pub async fn complete(cfg: &LlmProviderConfig, messages: &[Value]) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&request_body(cfg, messages, false))
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_completion_response(&json)
}

/// Opens a streamed completion. The returned stream yields non-empty text fragments in arrival
/// order and ends at `[DONE]` or when the connection closes. Dropping it closes the connection.
pub async fn complete_stream(
	cfg: &LlmProviderConfig,
	messages: &[Value],
) -> Result<FragmentStream> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&request_body(cfg, messages, true))
		.send()
		.await?
		.error_for_status()?;

	struct State {
		bytes: BoxStream<'static, reqwest::Result<Vec<u8>>>,
		decoder: SseDecoder,
		pending: VecDeque<String>,
		done: bool,
	}

	let state = State {
		bytes: res.bytes_stream().map(|chunk| chunk.map(|bytes| bytes.to_vec())).boxed(),
		decoder: SseDecoder::default(),
		pending: VecDeque::new(),
		done: false,
	};
	let fragments = stream::unfold(state, |mut state| async move {
		loop {
			if let Some(fragment) = state.pending.pop_front() {
				return Some((Ok(fragment), state));
			}
			if state.done {
				return None;
			}

			let events = match state.bytes.next().await {
				Some(Ok(chunk)) => state.decoder.push(&chunk),
				Some(Err(err)) => {
					state.done = true;

					return Some((Err(err.into()), state));
				},
				None => {
					state.done = true;

					state.decoder.finish()
				},
			};
			let events = match events {
				Ok(events) => events,
				Err(err) => {
					state.done = true;

					return Some((Err(err), state));
				},
			};

			for event in events {
				match event {
					SseEvent::Delta(text) if !text.is_empty() => state.pending.push_back(text),
					SseEvent::Delta(_) => {},
					SseEvent::Done => {
						state.done = true;

						break;
					},
				}
			}
		}
	});

	Ok(fragments.boxed())
}

fn request_body(cfg: &LlmProviderConfig, messages: &[Value], stream: bool) -> Value {
	serde_json::json!({
		"model": cfg.model,
		"messages": messages,
		"temperature": cfg.temperature,
		"top_p": cfg.top_p,
		"max_tokens": cfg.max_tokens,
		"stream": stream,
	})
}

fn parse_completion_response(json: &Value) -> Result<String> {
	let choice = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.ok_or_else(|| eyre::eyre!("Completion response is missing choices."))?;

	Ok(choice
		.get("message")
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.unwrap_or_default()
		.to_string())
}

fn parse_stream_line(line: &str) -> Result<Option<SseEvent>> {
	let line = line.trim_end_matches(['\r', '\n']);
	let Some(data) = line.strip_prefix("data:") else {
		return Ok(None);
	};
	let data = data.trim();

	if data.is_empty() {
		return Ok(None);
	}
	if data == "[DONE]" {
		return Ok(Some(SseEvent::Done));
	}

	let json: Value = serde_json::from_str(data)
		.map_err(|err| eyre::eyre!("Completion stream chunk is not valid JSON: {err}."))?;
	let choice = json.get("choices").and_then(|v| v.as_array()).and_then(|arr| arr.first());
	let content = choice
		.and_then(|choice| choice.get("delta").or_else(|| choice.get("message")))
		.and_then(|delta| delta.get("content"))
		.and_then(|c| c.as_str())
		.unwrap_or_default();

	Ok(Some(SseEvent::Delta(content.to_string())))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_whole_completion() {
		let json = serde_json::json!({
			"choices": [{ "message": { "content": "Employers must disclose." } }]
		});

		assert_eq!(
			parse_completion_response(&json).expect("parse failed"),
			"Employers must disclose."
		);
	}

	#[test]
	fn missing_content_is_empty() {
		let json = serde_json::json!({ "choices": [{ "message": {} }] });

		assert_eq!(parse_completion_response(&json).expect("parse failed"), "");
	}

	#[test]
	fn ignores_comments_and_blank_lines() {
		assert_eq!(parse_stream_line(": keep-alive\n").expect("parse failed"), None);
		assert_eq!(parse_stream_line("\n").expect("parse failed"), None);
		assert_eq!(
			parse_stream_line("data: [DONE]\r\n").expect("parse failed"),
			Some(SseEvent::Done)
		);
	}
}
