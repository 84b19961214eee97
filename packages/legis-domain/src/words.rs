/// Lowercased word tokens. Apostrophes stay inside words so "don't" is one token.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
	text.to_lowercase()
		.split(|ch: char| !(ch.is_alphanumeric() || ch == '\''))
		.filter(|token| !token.is_empty())
		.map(|token| token.to_string())
		.collect()
}

/// True when `phrase` occurs in `tokens` as a run of whole words.
pub(crate) fn contains_phrase(tokens: &[String], phrase: &str) -> bool {
	let needle = tokenize(phrase);

	if needle.is_empty() || needle.len() > tokens.len() {
		return false;
	}

	tokens.windows(needle.len()).any(|window| window == needle.as_slice())
}

pub(crate) fn contains_any(tokens: &[String], phrases: &[String]) -> bool {
	phrases.iter().any(|phrase| contains_phrase(tokens, phrase))
}

/// Like [`contains_phrase`], but each message word only has to start with the matching
/// phrase word, so "regulations" carries "regulation".
pub(crate) fn contains_phrase_prefix(tokens: &[String], phrase: &str) -> bool {
	let needle = tokenize(phrase);

	if needle.is_empty() || needle.len() > tokens.len() {
		return false;
	}

	tokens.windows(needle.len()).any(|window| {
		window.iter().zip(&needle).all(|(token, word)| token.starts_with(word.as_str()))
	})
}

pub(crate) fn contains_any_prefix(tokens: &[String], phrases: &[String]) -> bool {
	phrases.iter().any(|phrase| contains_phrase_prefix(tokens, phrase))
}
