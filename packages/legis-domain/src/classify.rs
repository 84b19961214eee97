use serde::Serialize;

use crate::words;
use legis_config::Classifier;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
	Greeting,
	GeneralChat,
	PolicyQuery,
}
impl QueryKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Greeting => "greeting",
			Self::GeneralChat => "general_chat",
			Self::PolicyQuery => "policy_query",
		}
	}
}

/// Priority chain: greeting, then general chat, then policy query.
pub fn classify(message: &str, cfg: &Classifier) -> QueryKind {
	if is_greeting(message, cfg) {
		return QueryKind::Greeting;
	}
	if looks_general(message, cfg) {
		return QueryKind::GeneralChat;
	}

	QueryKind::PolicyQuery
}

pub fn is_greeting(message: &str, cfg: &Classifier) -> bool {
	let trimmed = message.trim().to_lowercase();

	if trimmed.is_empty() {
		return false;
	}

	let len = trimmed.chars().count();

	if len <= cfg.greeting_prefix_max_chars as usize
		&& cfg.greeting_words.iter().any(|word| {
			let prefix: String = word.chars().take(len).collect();

			!prefix.is_empty() && trimmed.starts_with(prefix.as_str())
		}) {
		return true;
	}

	words::contains_any(&words::tokenize(&trimmed), &cfg.greeting_words)
}

/// Lacks every legal/domain hint and carries at least one generic help word.
///
/// Domain hints match word prefixes ("laws", "AI-powered"); help words match whole words.
pub fn looks_general(message: &str, cfg: &Classifier) -> bool {
	let tokens = words::tokenize(message);

	!words::contains_any_prefix(&tokens, &cfg.domain_hint_words)
		&& words::contains_any(&tokens, &cfg.general_hint_words)
}
