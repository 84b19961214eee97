//! Output shaping for generated policy answers.
//!
//! Streamed answers never pass through here; only whole responses do.

use std::sync::LazyLock;

use regex::Regex;

pub const DISCLAIMER: &str = "Not legal advice";
pub const NEXT_STEPS_HEADING: &str = "Next steps:";
pub const DEFAULT_STEPS: [&str; 2] = [
	"Inventory where automated tools influence decisions; document vendor, model, purpose, data, and human review.",
	"Request vendors’ latest bias-testing or impact-assessment results and prepare a one-paragraph applicant disclosure with a human-review option.",
];

static BANNED_PHRASES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
	[r"(?i)review( the)? bills?", r"(?i)monitor(ing)? updates", r"(?i)monitor legislative updates"]
		.into_iter()
		.map(|pattern| Regex::new(pattern).expect("Banned phrase pattern must compile."))
		.collect()
});
static TRAILING_WS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("Whitespace pattern must compile."));
static STEP_LINE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?m)^(?:-|\d+\.)[ \t]*(.+)$").expect("Step line pattern must compile.")
});
static NEXT_STEPS_SECTION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?is)\n?\s*next steps:.*$").expect("Next steps pattern must compile.")
});
static NEXT_STEPS_HEADING_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)next steps:").expect("Heading pattern must compile."));

/// Enforces the answer shape: banned phrases removed, exactly two next steps under a
/// "Next steps:" heading, and a closing disclaimer. Total over any input.
pub fn postprocess_policy_answer(text: &str) -> String {
	let mut out = strip_banned_phrases(text.trim());

	out = TRAILING_WS.replace_all(&out, "\n").trim().to_string();

	if !has_two_next_steps(&out) {
		out = NEXT_STEPS_SECTION.replace(&out, "").trim().to_string();

		if !out.is_empty() {
			out.push_str("\n\n");
		}

		out.push_str(NEXT_STEPS_HEADING);

		for step in DEFAULT_STEPS {
			out.push_str("\n- ");
			out.push_str(step);
		}
	}
	if !out.contains(DISCLAIMER) {
		out.push_str("\n\n");
		out.push_str(DISCLAIMER);
		out.push('.');
	}

	out
}

pub fn strip_banned_phrases(text: &str) -> String {
	let mut out = text.to_string();

	// Removing one match can splice a new one together, so repeat until stable.
	loop {
		let before = out.len();

		for pattern in BANNED_PHRASES.iter() {
			out = pattern.replace_all(&out, "").into_owned();
		}

		if out.len() == before {
			return out;
		}
	}
}

pub fn contains_banned_phrase(text: &str) -> bool {
	BANNED_PHRASES.iter().any(|pattern| pattern.is_match(text))
}

/// Exactly two step lines overall, and both sit after the last "Next steps:" heading.
fn has_two_next_steps(text: &str) -> bool {
	if STEP_LINE.find_iter(text).count() != 2 {
		return false;
	}

	let Some(heading) = NEXT_STEPS_HEADING_RE.find_iter(text).last() else {
		return false;
	};

	STEP_LINE.find_iter(&text[heading.end()..]).count() == 2
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keeps_well_formed_steps() {
		let input = "Summary sentence.\n\nNext steps:\n- Do one thing.\n- Do another.\n\nNot legal advice.";

		assert_eq!(postprocess_policy_answer(input), input);
	}

	#[test]
	fn steps_without_heading_are_replaced() {
		let input = "Summary.\n- first\n- second";
		let out = postprocess_policy_answer(input);

		assert!(out.contains(NEXT_STEPS_HEADING));
		assert!(out.contains(DEFAULT_STEPS[0]));
	}

	#[test]
	fn bare_dash_does_not_join_the_next_line_into_a_step() {
		let input = "Summary.\n\nNext steps:\n-\nAudit vendors.\n- Notify applicants.";
		let out = postprocess_policy_answer(input);

		assert!(out.contains(DEFAULT_STEPS[0]));
		assert!(out.contains(DEFAULT_STEPS[1]));
		assert!(!out.contains("Notify applicants."));
	}

	#[test]
	fn spliced_banned_phrase_is_removed() {
		let out = strip_banned_phrases("monitor monitoring updates updates");

		assert!(!contains_banned_phrase(&out));
	}
}
