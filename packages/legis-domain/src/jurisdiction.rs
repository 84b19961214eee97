const STATE_CODES: [(&str, &str); 52] = [
	("alabama", "AL"),
	("alaska", "AK"),
	("arizona", "AZ"),
	("arkansas", "AR"),
	("california", "CA"),
	("colorado", "CO"),
	("connecticut", "CT"),
	("delaware", "DE"),
	("florida", "FL"),
	("georgia", "GA"),
	("hawaii", "HI"),
	("idaho", "ID"),
	("illinois", "IL"),
	("indiana", "IN"),
	("iowa", "IA"),
	("kansas", "KS"),
	("kentucky", "KY"),
	("louisiana", "LA"),
	("maine", "ME"),
	("maryland", "MD"),
	("massachusetts", "MA"),
	("michigan", "MI"),
	("minnesota", "MN"),
	("mississippi", "MS"),
	("missouri", "MO"),
	("montana", "MT"),
	("nebraska", "NE"),
	("nevada", "NV"),
	("new hampshire", "NH"),
	("new jersey", "NJ"),
	("new mexico", "NM"),
	("new york", "NY"),
	("north carolina", "NC"),
	("north dakota", "ND"),
	("ohio", "OH"),
	("oklahoma", "OK"),
	("oregon", "OR"),
	("pennsylvania", "PA"),
	("rhode island", "RI"),
	("south carolina", "SC"),
	("south dakota", "SD"),
	("tennessee", "TN"),
	("texas", "TX"),
	("utah", "UT"),
	("vermont", "VT"),
	("virginia", "VA"),
	("washington", "WA"),
	("west virginia", "WV"),
	("wisconsin", "WI"),
	("wyoming", "WY"),
	("district of columbia", "DC"),
	("puerto rico", "PR"),
];

/// Canonical two-letter code for a state name or code.
///
/// Total over any input: blank input yields an empty string and unrecognized names come back
/// uppercased.
pub fn normalize_jurisdiction(input: &str) -> String {
	let trimmed = input.trim();

	if trimmed.is_empty() {
		return String::new();
	}
	if trimmed.chars().count() == 2 && trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
		return trimmed.to_ascii_uppercase();
	}

	let key = trimmed.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();

	STATE_CODES
		.iter()
		.find(|(name, _)| *name == key)
		.map(|(_, code)| code.to_string())
		.unwrap_or_else(|| trimmed.to_uppercase())
}

/// Whether two free-text jurisdictions name the same place. Blank values never match.
pub fn same_jurisdiction(left: &str, right: &str) -> bool {
	let left = normalize_jurisdiction(left);

	!left.is_empty() && left == normalize_jurisdiction(right)
}
