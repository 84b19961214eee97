use std::collections::HashSet;

use crate::candidate::Candidate;

/// Concatenates the jurisdiction-filtered and global lists, keeping the first occurrence of each
/// `(bill_id, jurisdiction)` key.
pub fn merge_candidates(jurisdiction_hits: Vec<Candidate>, global_hits: Vec<Candidate>) -> Vec<Candidate> {
	let mut seen: HashSet<(String, String)> = HashSet::new();
	let mut out = Vec::with_capacity(jurisdiction_hits.len() + global_hits.len());

	for candidate in jurisdiction_hits.into_iter().chain(global_hits) {
		let key = candidate.key();

		if seen.insert((key.bill_id.to_string(), key.jurisdiction.to_string())) {
			out.push(candidate);
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	fn candidate(bill_id: &str, jurisdiction: &str, similarity: f32) -> Candidate {
		Candidate {
			bill_id: bill_id.to_string(),
			title: format!("{bill_id} title"),
			jurisdiction: jurisdiction.to_string(),
			categories: Default::default(),
			date: None,
			url: None,
			snippet: String::new(),
			similarity,
		}
	}

	#[test]
	fn jurisdiction_hits_win_duplicates() {
		let merged = merge_candidates(
			vec![candidate("A1", "NY", 0.5), candidate("A2", "NY", 0.4)],
			vec![candidate("G1", "CA", 0.9), candidate("A1", "NY", 0.7), candidate("A2", "NY", 0.6)],
		);
		let ids: Vec<_> = merged.iter().map(|c| c.bill_id.as_str()).collect();

		assert_eq!(ids, vec!["A1", "A2", "G1"]);
		assert_eq!(merged[0].similarity, 0.5);
	}

	#[test]
	fn same_bill_id_in_other_jurisdiction_is_distinct() {
		let merged =
			merge_candidates(vec![candidate("SB1", "NY", 0.5)], vec![candidate("SB1", "CA", 0.5)]);

		assert_eq!(merged.len(), 2);
	}

	#[test]
	fn duplicates_within_one_list_collapse() {
		let merged = merge_candidates(
			Vec::new(),
			vec![candidate("G1", "CA", 0.9), candidate("G1", "CA", 0.8)],
		);

		assert_eq!(merged.len(), 1);
		assert_eq!(merged[0].similarity, 0.9);
	}
}
