use futures::{
	StreamExt, future,
	stream::{self, BoxStream},
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
	Error, LegisService, Result,
	candidate::{Candidate, Reply, ScoredCandidate, SourcesPayload},
	prompt,
	ranking::{self, ScoringContext, SelectionOutcome},
};
use legis_domain::{
	augment::augment_query,
	classify::{QueryKind, classify},
	jurisdiction::normalize_jurisdiction,
	postprocess::postprocess_policy_answer,
};
use legis_storage::models::Profile;

/// Prefix of the final streamed fragment. The JSON sources payload follows it directly.
pub const SOURCES_MARKER: &str = "\n||SOURCES||";

pub type AnswerStream = BoxStream<'static, String>;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
	pub session_id: String,
	pub message: String,
}

/// What a chat turn resolves to before any generation happens.
enum Plan {
	Fixed(String),
	General { messages: Vec<Value> },
	Policy { profile: Profile, messages: Vec<Value>, selected: Vec<Candidate> },
}

impl LegisService {
	pub async fn answer(&self, req: ChatRequest) -> Result<Reply> {
		match self.plan(&req).await? {
			Plan::Fixed(text) => Ok(Reply::text_only(text)),
			Plan::General { messages } => {
				let text = self.generate(&messages).await.unwrap_or_else(|| {
					tracing::info!("General chat generation was empty. Using fallback reply.");

					prompt::GENERAL_FALLBACK.to_string()
				});

				Ok(Reply::text_only(text))
			},
			Plan::Policy { profile, messages, selected } => {
				let text = match self.generate(&messages).await {
					Some(raw) => postprocess_policy_answer(&raw),
					None => {
						tracing::info!(
							selected = selected.len(),
							"Policy generation was empty. Using fallback summary."
						);

						prompt::fallback_summary(&profile, &selected)
					},
				};

				Ok(Reply { text, sources: selected })
			},
		}
	}

	/// Streams the reply as raw fragments, then one [`SOURCES_MARKER`] fragment. Generated text
	/// is passed through unvalidated.
	pub async fn answer_stream(&self, req: ChatRequest) -> Result<AnswerStream> {
		let (body, sources) = match self.plan(&req).await? {
			Plan::Fixed(text) => (stream::once(future::ready(text)).boxed(), Vec::new()),
			Plan::General { messages } => (self.generate_stream(messages).await, Vec::new()),
			Plan::Policy { messages, selected, .. } =>
				(self.generate_stream(messages).await, selected),
		};
		let marker = sources_marker(sources)?;

		Ok(body.chain(stream::once(future::ready(marker))).boxed())
	}

	async fn plan(&self, req: &ChatRequest) -> Result<Plan> {
		let profile = self.profiles.get_profile(&req.session_id).await?.unwrap_or_default();
		let kind = classify(&req.message, &self.cfg.classifier);

		tracing::info!(kind = kind.as_str(), "Classified chat message.");

		match kind {
			QueryKind::Greeting => Ok(Plan::Fixed(prompt::greeting_reply(&profile))),
			QueryKind::GeneralChat =>
				Ok(Plan::General { messages: prompt::general_messages(&req.message) }),
			QueryKind::PolicyQuery => self.plan_policy(req, profile).await,
		}
	}

	async fn plan_policy(&self, req: &ChatRequest, profile: Profile) -> Result<Plan> {
		let jurisdiction = normalize_jurisdiction(profile.state.as_deref().unwrap_or_default());
		let query = augment_query(
			&req.message,
			QueryKind::PolicyQuery,
			&jurisdiction,
			&self.cfg.classifier.synonyms,
		);
		let retrieval = &self.cfg.retrieval;
		let jurisdiction_search = async {
			if jurisdiction.is_empty() {
				return Ok(Vec::new());
			}

			self.gateway.search_jurisdiction(&query, &jurisdiction, retrieval.jurisdiction_k).await
		};
		let global_search = self.gateway.search_global(&query, retrieval.global_k);
		let (jurisdiction_hits, global_hits) = futures::try_join!(jurisdiction_search, global_search)?;

		tracing::info!(
			jurisdiction = %jurisdiction,
			jurisdiction_hits = jurisdiction_hits.len(),
			global_hits = global_hits.len(),
			"Retrieved candidates."
		);

		let merged = ranking::merge_candidates(jurisdiction_hits, global_hits);
		let ctx =
			ScoringContext::new(&self.cfg.ranking, &jurisdiction, &profile.categories, &query);
		let scored = ranking::score_candidates(&self.cfg.ranking, &ctx, merged);
		let outcome = ranking::select_candidates(&self.cfg.selection, &jurisdiction, scored);

		tracing::info!(selected = outcome.len(), "Selected candidates.");

		let selected = match outcome {
			SelectionOutcome::Selected(selected) => into_candidates(selected),
			SelectionOutcome::NoneInJurisdiction =>
				return Ok(Plan::Fixed(prompt::NO_ITEMS_IN_JURISDICTION.to_string())),
			SelectionOutcome::NoneFound =>
				return Ok(Plan::Fixed(prompt::NO_ITEMS_FOUND.to_string())),
		};
		let context = prompt::context_block(&selected);
		let messages = prompt::policy_messages(&jurisdiction, &req.message, &context);

		Ok(Plan::Policy { profile, messages, selected })
	}

	/// Whole-response generation. Failures and blank output both yield `None`.
	async fn generate(&self, messages: &[Value]) -> Option<String> {
		match self.providers.completion.complete(&self.cfg.providers.llm, messages).await {
			Ok(text) if !text.trim().is_empty() => Some(text),
			Ok(_) => None,
			Err(err) => {
				tracing::warn!(error = %err, "Completion request failed.");

				None
			},
		}
	}

	/// Non-empty fragments in arrival order. A failure to open the stream or a mid-stream error
	/// ends the body early.
	async fn generate_stream(&self, messages: Vec<Value>) -> AnswerStream {
		let fragments =
			match self.providers.completion.complete_stream(&self.cfg.providers.llm, &messages).await
			{
				Ok(fragments) => fragments,
				Err(err) => {
					tracing::warn!(error = %err, "Failed to open completion stream.");

					return stream::empty().boxed();
				},
			};

		fragments
			.take_while(|item| {
				if let Err(err) = item {
					tracing::warn!(error = %err, "Completion stream failed. Ending body early.");
				}

				future::ready(item.is_ok())
			})
			.filter_map(|item| future::ready(item.ok().filter(|fragment| !fragment.is_empty())))
			.boxed()
	}
}

pub fn sources_marker(sources: Vec<Candidate>) -> Result<String> {
	let payload = serde_json::to_string(&SourcesPayload { sources })
		.map_err(|err| Error::Internal { message: format!("Failed to serialize sources: {err}.") })?;

	Ok(format!("{SOURCES_MARKER}{payload}"))
}

fn into_candidates(selected: Vec<ScoredCandidate>) -> Vec<Candidate> {
	selected.into_iter().map(|item| item.candidate).collect()
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use super::*;

	#[test]
	fn sources_marker_writes_non_finite_similarity_as_null() {
		let candidate = Candidate {
			bill_id: "NY-1".to_string(),
			title: "Automated hiring tools".to_string(),
			jurisdiction: "NY".to_string(),
			categories: BTreeSet::new(),
			date: None,
			url: None,
			snippet: "Bias audits.".to_string(),
			similarity: f32::NAN,
		};
		let marker = sources_marker(vec![candidate]).expect("Marker failed.");

		assert!(marker.starts_with(SOURCES_MARKER));
		assert!(marker.contains("\"similarity\":null"));
	}
}
