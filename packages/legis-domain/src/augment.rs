use crate::classify::QueryKind;

/// Widens a policy query with the jurisdiction and domain synonyms. Other kinds pass through.
pub fn augment_query(
	message: &str,
	kind: QueryKind,
	jurisdiction: &str,
	synonyms: &[String],
) -> String {
	if kind != QueryKind::PolicyQuery {
		return message.to_string();
	}

	let mut parts = Vec::with_capacity(synonyms.len() + 2);
	let message = message.trim();

	if !message.is_empty() {
		parts.push(message.to_string());
	}

	let jurisdiction = jurisdiction.trim();

	if !jurisdiction.is_empty() {
		parts.push(format!("in {jurisdiction}"));
	}

	parts.extend(
		synonyms.iter().map(|term| term.trim()).filter(|term| !term.is_empty()).map(String::from),
	);

	parts.join(" ")
}
