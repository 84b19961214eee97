use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One retrieved bill. Two candidates with the same [`Candidate::key`] are the same bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
	pub bill_id: String,
	pub title: String,
	pub jurisdiction: String,
	pub categories: BTreeSet<String>,
	pub date: Option<String>,
	pub url: Option<String>,
	pub snippet: String,
	pub similarity: f32,
}
impl Candidate {
	pub fn key(&self) -> CandidateKey<'_> {
		CandidateKey { bill_id: self.bill_id.as_str(), jurisdiction: self.jurisdiction.as_str() }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateKey<'a> {
	pub bill_id: &'a str,
	pub jurisdiction: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
	pub candidate: Candidate,
	pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
	pub text: String,
	pub sources: Vec<Candidate>,
}
impl Reply {
	pub fn text_only(text: impl Into<String>) -> Self {
		Self { text: text.into(), sources: Vec::new() }
	}
}

/// Payload of the trailing streaming marker.
#[derive(Debug, Serialize, Deserialize)]
pub struct SourcesPayload {
	pub sources: Vec<Candidate>,
}
