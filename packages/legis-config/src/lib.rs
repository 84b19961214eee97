mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Classifier, Config, EmbeddingProviderConfig, LlmProviderConfig, Postgres, Providers, Qdrant,
	Ranking, Retrieval, Selection, Service, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.collection.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.collection must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions != cfg.storage.qdrant.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.qdrant.vector_dim."
				.to_string(),
		});
	}

	for (label, key) in
		[("embedding", &cfg.providers.embedding.api_key), ("llm", &cfg.providers.llm.api_key)]
	{
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	if !(0.0..=2.0).contains(&cfg.providers.llm.temperature) {
		return Err(Error::Validation {
			message: "providers.llm.temperature must be in the range 0.0-2.0.".to_string(),
		});
	}
	if !(cfg.providers.llm.top_p > 0.0 && cfg.providers.llm.top_p <= 1.0) {
		return Err(Error::Validation {
			message: "providers.llm.top_p must be in the range (0.0, 1.0].".to_string(),
		});
	}
	if cfg.providers.llm.max_tokens == 0 {
		return Err(Error::Validation {
			message: "providers.llm.max_tokens must be greater than zero.".to_string(),
		});
	}

	validate_retrieval(cfg)?;
	validate_ranking(cfg)?;
	validate_selection(cfg)?;

	if cfg.classifier.greeting_words.iter().all(|word| word.trim().is_empty()) {
		return Err(Error::Validation {
			message: "classifier.greeting_words must contain at least one word.".to_string(),
		});
	}

	Ok(())
}

fn validate_retrieval(cfg: &Config) -> Result<()> {
	for (label, value) in [
		("retrieval.jurisdiction_k", cfg.retrieval.jurisdiction_k),
		("retrieval.global_k", cfg.retrieval.global_k),
		("retrieval.widen_factor", cfg.retrieval.widen_factor),
		("retrieval.snippet_max_chars", cfg.retrieval.snippet_max_chars),
		("retrieval.search_default_k", cfg.retrieval.search_default_k),
	] {
		if value == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	Ok(())
}

fn validate_ranking(cfg: &Config) -> Result<()> {
	for (label, weight) in [
		("ranking.similarity_weight", cfg.ranking.similarity_weight),
		("ranking.jurisdiction_weight", cfg.ranking.jurisdiction_weight),
		("ranking.category_weight", cfg.ranking.category_weight),
		("ranking.recency_weight", cfg.ranking.recency_weight),
	] {
		if !weight.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if weight < 0.0 {
			return Err(Error::Validation { message: format!("{label} must be zero or greater.") });
		}
	}

	if !cfg.ranking.recency_tau_days.is_finite() || cfg.ranking.recency_tau_days <= 0.0 {
		return Err(Error::Validation {
			message: "ranking.recency_tau_days must be a finite number greater than zero."
				.to_string(),
		});
	}

	Ok(())
}

fn validate_selection(cfg: &Config) -> Result<()> {
	let selection = &cfg.selection;

	if selection.max_results == 0 {
		return Err(Error::Validation {
			message: "selection.max_results must be greater than zero.".to_string(),
		});
	}
	let blended = selection.blend_in_jurisdiction.checked_add(selection.blend_out_of_jurisdiction);

	if blended.is_none_or(|total| total > selection.max_results) {
		return Err(Error::Validation {
			message: "selection.blend_in_jurisdiction plus selection.blend_out_of_jurisdiction must not exceed selection.max_results."
				.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.providers
		.embedding
		.query_prefix
		.as_deref()
		.map(|prefix| prefix.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.providers.embedding.query_prefix = None;
	}

	for words in [
		&mut cfg.classifier.greeting_words,
		&mut cfg.classifier.domain_hint_words,
		&mut cfg.classifier.general_hint_words,
		&mut cfg.ranking.hiring_terms,
	] {
		for word in words.iter_mut() {
			*word = word.trim().to_lowercase();
		}

		words.retain(|word| !word.is_empty());
	}

	for category in cfg.ranking.hiring_default_categories.iter_mut() {
		*category = category.trim().to_lowercase();
	}
}
