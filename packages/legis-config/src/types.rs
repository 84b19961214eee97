use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub retrieval: Retrieval,
	#[serde(default)]
	pub ranking: Ranking,
	#[serde(default)]
	pub selection: Selection,
	#[serde(default)]
	pub classifier: Classifier,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	#[serde(default = "default_true")]
	pub cors_allow_any: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	pub qdrant: Qdrant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub collection: String,
	pub vector_dim: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub llm: LlmProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
	/// Prepended to every query before embedding, e.g. "query: " for E5-family models.
	#[serde(default)]
	pub query_prefix: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	#[serde(default = "default_temperature")]
	pub temperature: f32,
	#[serde(default = "default_top_p")]
	pub top_p: f32,
	#[serde(default = "default_max_tokens")]
	pub max_tokens: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Retrieval {
	pub jurisdiction_k: u32,
	pub global_k: u32,
	/// Jurisdiction search scans `max(k * widen_factor, widen_min)` points before filtering.
	pub widen_factor: u32,
	pub widen_min: u32,
	pub snippet_max_chars: u32,
	pub search_default_k: u32,
}
impl Default for Retrieval {
	fn default() -> Self {
		Self {
			jurisdiction_k: 20,
			global_k: 30,
			widen_factor: 10,
			widen_min: 200,
			snippet_max_chars: 600,
			search_default_k: 8,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ranking {
	pub similarity_weight: f32,
	pub jurisdiction_weight: f32,
	pub category_weight: f32,
	pub recency_weight: f32,
	pub recency_tau_days: f32,
	/// Query terms that switch on the hiring category defaults for profiles without categories.
	pub hiring_terms: Vec<String>,
	pub hiring_default_categories: Vec<String>,
}
impl Default for Ranking {
	fn default() -> Self {
		Self {
			similarity_weight: 0.45,
			jurisdiction_weight: 0.40,
			category_weight: 0.10,
			recency_weight: 0.05,
			recency_tau_days: 540.0,
			hiring_terms: strings(&["hiring", "employment", "aedt", "screening"]),
			hiring_default_categories: strings(&[
				"effect on labor/employment",
				"private sector use",
			]),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Selection {
	pub strict_jurisdiction: bool,
	pub max_results: u32,
	pub blend_in_jurisdiction: u32,
	pub blend_out_of_jurisdiction: u32,
}
impl Default for Selection {
	fn default() -> Self {
		Self {
			strict_jurisdiction: true,
			max_results: 6,
			blend_in_jurisdiction: 4,
			blend_out_of_jurisdiction: 2,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Classifier {
	pub greeting_words: Vec<String>,
	pub domain_hint_words: Vec<String>,
	pub general_hint_words: Vec<String>,
	pub greeting_prefix_max_chars: u32,
	/// Appended to policy queries before retrieval.
	pub synonyms: Vec<String>,
}
impl Default for Classifier {
	fn default() -> Self {
		Self {
			greeting_words: strings(&[
				"hi",
				"hello",
				"hey",
				"hola",
				"yo",
				"sup",
				"how are you",
				"good morning",
				"good evening",
				"good afternoon",
			]),
			domain_hint_words: strings(&[
				"ai",
				"bill",
				"law",
				"act",
				"regulation",
				"hiring",
				"privacy",
				"biometric",
				"automated",
				"compliance",
				"audit",
			]),
			general_hint_words: strings(&[
				"how",
				"what",
				"why",
				"explain",
				"help",
				"best",
				"tips",
				"difference",
				"compare",
				"write",
				"fix",
				"error",
			]),
			greeting_prefix_max_chars: 6,
			synonyms: strings(&[
				"automated hiring",
				"automated employment decision tools",
				"AEDT",
				"employment screening",
				"recruiting algorithms",
				"bias audit",
				"audit",
			]),
		}
	}
}

fn strings(values: &[&str]) -> Vec<String> {
	values.iter().map(|value| value.to_string()).collect()
}

fn default_true() -> bool {
	true
}

fn default_temperature() -> f32 {
	0.2
}

fn default_top_p() -> f32 {
	0.9
}

fn default_max_tokens() -> u32 {
	600
}
