//! Prompt text and the fixed replies that bypass generation.

use serde_json::{Value, json};

use crate::candidate::Candidate;
use legis_storage::models::Profile;

pub const POLICY_SYSTEM_PROMPT: &str = "\
You are an AI policy explainer for business executives. \
Write 5–7 crisp sentences in plain English. \
State what the retrieved bills mean in practice for employers: who is covered; key obligations \
(audits, disclosures, notices, risk assessments); penalties or private right of action; effective \
dates/status (e.g., pending/enacted). \
If the state has no bill directly covering the user’s use case, say that plainly and (only if \
requested) mention a nearby model bill. \
Do not tell the user to 'review' anything or to 'monitor updates'. Avoid legalese. \
End with exactly two concrete next steps written as imperative verbs. Not legal advice.";
pub const GENERAL_SYSTEM_PROMPT: &str = "\
You are a helpful, concise assistant. Be friendly, practical, and upbeat. \
Answer in 4–6 short sentences unless the user asks for code or lists.";
pub const GENERAL_FALLBACK: &str = "Happy to help, sir.";
pub const NO_ITEMS_IN_JURISDICTION: &str = "This state currently has no directly relevant items in \
our corpus. Ask to broaden the search if you want regional model bills.";
pub const NO_ITEMS_FOUND: &str = "I couldn’t find relevant items. Try adding your state or more \
context about the AI use (e.g., automated hiring bias audit).";

const FALLBACK_MATCHES_MAX_CHARS: usize = 600;

/// One line per candidate plus an indented snippet line. Empty optional fields are left out.
pub fn context_block<'a>(candidates: impl IntoIterator<Item = &'a Candidate>) -> String {
	let mut lines = Vec::new();

	for candidate in candidates {
		let mut line = format!(
			"{} | {} | jurisdiction: {}",
			candidate.bill_id, candidate.title, candidate.jurisdiction
		);

		if let Some(date) = candidate.date.as_deref().filter(|date| !date.is_empty()) {
			line.push_str(&format!(" | date: {date}"));
		}
		if !candidate.categories.is_empty() {
			let categories = candidate.categories.iter().map(String::as_str).collect::<Vec<_>>();

			line.push_str(&format!(" | categories: {}", categories.join(", ")));
		}
		if let Some(url) = candidate.url.as_deref().filter(|url| !url.is_empty()) {
			line.push_str(&format!(" | url: {url}"));
		}

		line.push_str(&format!("\n  snippet: {}", candidate.snippet));
		lines.push(line);
	}

	lines.join("\n")
}

pub fn policy_messages(jurisdiction: &str, question: &str, context: &str) -> Vec<Value> {
	let jurisdiction = if jurisdiction.is_empty() { "unspecified" } else { jurisdiction };
	let user = format!(
		"Company state: {jurisdiction}\n\
User question: {question}\n\n\
Relevant bills (metadata + short snippets). Summarize what they mean in practice for an employer \
in this state.\n\
{context}\n\n\
Output:\n\
- 5–7 sentences, plain English, executive tone.\n\
- If no bill directly covers the use in this state, say so plainly. Do not discuss other states \
unless the user asks.\n\
- Mention obligations (audits, disclosures, notices, risk assessments), penalties/PRoA, and \
effective dates/status when present.\n\
- Finish with EXACTLY TWO concrete next steps (imperative verbs)."
	);

	vec![
		json!({ "role": "system", "content": POLICY_SYSTEM_PROMPT }),
		json!({ "role": "user", "content": user }),
	]
}

pub fn general_messages(message: &str) -> Vec<Value> {
	vec![
		json!({ "role": "system", "content": GENERAL_SYSTEM_PROMPT }),
		json!({ "role": "user", "content": message }),
	]
}

pub fn greeting_reply(profile: &Profile) -> String {
	let state = non_blank(profile.state.as_deref()).unwrap_or("your state");

	[
		"hi sir — I’m your AI policy explainer.".to_string(),
		format!(
			"I can summarize AI bills and explain what they mean for employers in {state}, in plain \
English."
		),
		"ask me something specific, or try one of these:".to_string(),
		format!("- Do we need to disclose AI use to applicants in {state}?"),
		format!("- Are bias audits required for automated hiring tools in {state}?"),
		format!("- {}", industry_example(profile, state)),
		"or ask general work questions — I’m happy to help.".to_string(),
	]
	.join("\n")
}

/// Deterministic answer used when generation returns nothing.
pub fn fallback_summary(profile: &Profile, selected: &[Candidate]) -> String {
	let state = non_blank(profile.state.as_deref()).unwrap_or("unspecified");
	let matches = selected
		.iter()
		.map(|candidate| {
			format!(
				"{} {} ({}, {})",
				candidate.bill_id,
				candidate.title,
				candidate.jurisdiction,
				candidate.date.as_deref().unwrap_or_default()
			)
			.trim()
			.to_string()
		})
		.filter(|entry| !entry.is_empty())
		.collect::<Vec<_>>()
		.join("; ");
	let matches: String = matches.chars().take(FALLBACK_MATCHES_MAX_CHARS).collect();

	format!(
		"Here’s a concise, plain-English summary for {state}. The top matches include {matches}. \
They focus on employer use of automated tools and typically require bias audits or disclosures. \
For decisions that affect hiring or screening, expect obligations like transparency to applicants \
and periodic risk assessments. Treat this as guidance, not legal advice."
	)
}

fn industry_example(profile: &Profile, state: &str) -> String {
	match non_blank(profile.industry.as_deref()) {
		Some(industry) =>
			format!("Any bills touching AI use for {} companies in {state}?", industry.to_lowercase()),
		None => format!("What counts as an automated employment decision tool in {state}?"),
	}
}

fn non_blank(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use super::*;

	fn candidate() -> Candidate {
		Candidate {
			bill_id: "A 7859".to_string(),
			title: "Bias audits for hiring tools".to_string(),
			jurisdiction: "NY".to_string(),
			categories: BTreeSet::from([
				"private sector use".to_string(),
				"effect on labor/employment".to_string(),
			]),
			date: Some("2024-03-01".to_string()),
			url: None,
			snippet: "Requires annual audits.".to_string(),
			similarity: 0.7,
		}
	}

	#[test]
	fn context_line_omits_missing_fields() {
		let block = context_block([&candidate()]);

		assert_eq!(
			block,
			"A 7859 | Bias audits for hiring tools | jurisdiction: NY | date: 2024-03-01 | \
categories: effect on labor/employment, private sector use\n  snippet: Requires annual audits."
		);
		assert!(!block.contains("url:"));
	}

	#[test]
	fn policy_prompt_carries_question_and_context() {
		let messages = policy_messages("", "are audits required", "CTX");
		let user = messages[1]["content"].as_str().unwrap_or_default();

		assert_eq!(messages[0]["content"], POLICY_SYSTEM_PROMPT);
		assert!(user.starts_with("Company state: unspecified\nUser question: are audits required"));
		assert!(user.contains("\nCTX\n"));
	}

	#[test]
	fn greeting_names_the_profile_state() {
		let profile = Profile { state: Some("CA".to_string()), ..Profile::default() };
		let reply = greeting_reply(&profile);

		assert!(reply.starts_with("hi sir"));
		assert!(reply.contains("employers in CA"));
		assert!(greeting_reply(&Profile::default()).contains("in your state"));
	}

	#[test]
	fn fallback_lists_top_matches() {
		let profile = Profile { state: Some("NY".to_string()), ..Profile::default() };
		let summary = fallback_summary(&profile, &[candidate()]);

		assert!(summary.starts_with("Here’s a concise, plain-English summary for NY."));
		assert!(summary.contains("A 7859 Bias audits for hiring tools (NY, 2024-03-01)"));
		assert!(summary.contains("not legal advice"));
	}
}
