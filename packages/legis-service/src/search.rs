use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Error, LegisService, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	pub top_k: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
	pub bill_id: String,
	pub title: String,
	pub jurisdiction: String,
	pub categories: BTreeSet<String>,
	pub date: Option<String>,
	pub url: Option<String>,
	pub score: f32,
}

impl LegisService {
	/// Unfiltered nearest-neighbour lookup over the raw query text.
	pub async fn search(&self, req: SearchRequest) -> Result<Vec<SearchHit>> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "query must be non-empty.".to_string() });
		}

		let top_k = req.top_k.unwrap_or(self.cfg.retrieval.search_default_k);

		if top_k == 0 {
			return Err(Error::InvalidRequest {
				message: "top_k must be greater than zero.".to_string(),
			});
		}

		let candidates = self.gateway.search_global(query, top_k).await?;

		tracing::info!(top_k, hits = candidates.len(), "Raw search completed.");

		Ok(candidates
			.into_iter()
			.map(|candidate| SearchHit {
				score: if candidate.similarity.is_finite() { candidate.similarity } else { 0.0 },
				bill_id: candidate.bill_id,
				title: candidate.title,
				jurisdiction: candidate.jurisdiction,
				categories: candidate.categories,
				date: candidate.date,
				url: candidate.url,
			})
			.collect())
	}
}
