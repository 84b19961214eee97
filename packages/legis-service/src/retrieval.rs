pub mod qdrant;

use std::collections::{BTreeSet, HashMap};

use qdrant_client::qdrant::{ScoredPoint, Value, value::Kind};

use crate::candidate::Candidate;
use legis_domain::jurisdiction::normalize_jurisdiction;

/// Pool size scanned before jurisdiction filtering: `max(k * widen_factor, widen_min)`, capped
/// at the corpus size.
pub fn widened_limit(k: u32, widen_factor: u32, widen_min: u32, corpus_size: u64) -> u64 {
	let widened = u64::from(k).saturating_mul(u64::from(widen_factor)).max(u64::from(widen_min));

	widened.min(corpus_size)
}

/// Keeps candidates whose normalized jurisdiction equals `jurisdiction`, in input order, up to
/// `k`.
pub fn filter_by_jurisdiction(
	candidates: Vec<Candidate>,
	jurisdiction: &str,
	k: u32,
) -> Vec<Candidate> {
	let code = normalize_jurisdiction(jurisdiction);

	if code.is_empty() {
		return Vec::new();
	}

	candidates
		.into_iter()
		.filter(|candidate| normalize_jurisdiction(&candidate.jurisdiction) == code)
		.take(k as usize)
		.collect()
}

/// Collapses whitespace and cuts at a word boundary, appending an ellipsis when shortened.
pub fn make_snippet(text: &str, max_chars: usize) -> String {
	let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

	if collapsed.chars().count() <= max_chars {
		return collapsed;
	}

	let cut: String = collapsed.chars().take(max_chars).collect();
	let cut = match cut.rfind(' ') {
		Some(idx) => &cut[..idx],
		None => cut.as_str(),
	};

	format!("{cut}…")
}

/// Splits `;`-separated or list-valued categories into a trimmed, lower-cased set.
pub fn parse_categories(value: Option<&Value>) -> BTreeSet<String> {
	let mut raw = Vec::new();

	match value.and_then(|value| value.kind.as_ref()) {
		Some(Kind::StringValue(text)) => raw.extend(text.split(';').map(str::to_string)),
		Some(Kind::ListValue(list)) =>
			for item in &list.values {
				if let Some(Kind::StringValue(text)) = &item.kind {
					raw.push(text.clone());
				}
			},
		_ => {},
	}

	raw.into_iter()
		.map(|category| category.trim().to_lowercase())
		.filter(|category| !category.is_empty())
		.collect()
}

/// Builds a candidate from a scored point. Points without a bill id are skipped.
pub fn candidate_from_point(point: &ScoredPoint, snippet_max_chars: usize) -> Option<Candidate> {
	let payload = &point.payload;
	let Some(bill_id) = payload_text(payload, "bill_id") else {
		tracing::warn!(point_id = ?point.id, "Skipping indexed point without a bill_id.");

		return None;
	};
	let jurisdiction = payload_text(payload, "jurisdiction")
		.or_else(|| payload_text(payload, "state"))
		.unwrap_or_default();
	let categories =
		parse_categories(payload.get("categories").or_else(|| payload.get("category")));
	let text = payload_text(payload, "text").unwrap_or_default();

	Some(Candidate {
		bill_id,
		title: payload_text(payload, "title").unwrap_or_default(),
		jurisdiction,
		categories,
		date: payload_text(payload, "date"),
		url: payload_text(payload, "url"),
		snippet: make_snippet(&text, snippet_max_chars),
		similarity: if point.score.is_finite() { point.score } else { 0.0 },
	})
}

/// Trimmed, non-empty string payload value.
fn payload_text(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::StringValue(text)) => {
			let trimmed = text.trim();

			if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
		},
		Some(Kind::IntegerValue(number)) => Some(number.to_string()),
		_ => None,
	}
}
