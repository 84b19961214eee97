pub mod answer;
pub mod candidate;
pub mod onboarding;
pub mod profiles;
pub mod prompt;
pub mod ranking;
pub mod retrieval;
pub mod search;

mod error;

pub use self::error::{Error, Result};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;
use uuid::Uuid;

pub use answer::{AnswerStream, ChatRequest, SOURCES_MARKER};
pub use candidate::{Candidate, Reply, ScoredCandidate, SourcesPayload};
use legis_config::{Config, EmbeddingProviderConfig, LlmProviderConfig};
use legis_providers::{completion, completion::FragmentStream, embedding};
use legis_storage::db::Db;
pub use legis_storage::models::Profile;
pub use onboarding::{OnboardingRequest, OnboardingResponse};
pub use profiles::PgProfileStore;
pub use retrieval::qdrant::QdrantGateway;
pub use search::{SearchHit, SearchRequest};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>>;
}

pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<String>>;

	fn complete_stream<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<FragmentStream>>;
}

/// Nearest-neighbour search over the bill corpus.
pub trait RetrievalGateway
where
	Self: Send + Sync,
{
	/// Forces one-time initialization. Fails when the index is unavailable.
	fn warm_up(&self) -> BoxFuture<'_, Result<()>>;

	fn search_global<'a>(&'a self, query: &'a str, k: u32) -> BoxFuture<'a, Result<Vec<Candidate>>>;

	/// Returns at most `k` candidates whose jurisdiction matches, or nothing for a blank
	/// jurisdiction.
	fn search_jurisdiction<'a>(
		&'a self,
		query: &'a str,
		jurisdiction: &'a str,
		k: u32,
	) -> BoxFuture<'a, Result<Vec<Candidate>>>;
}

pub trait ProfileStore
where
	Self: Send + Sync,
{
	/// Unknown or malformed session ids yield `None`.
	fn get_profile<'a>(&'a self, session_id: &'a str) -> BoxFuture<'a, Result<Option<Profile>>>;

	fn save_profile<'a>(
		&'a self,
		session_id: Uuid,
		profile: &'a Profile,
	) -> BoxFuture<'a, Result<()>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub completion: Arc<dyn CompletionProvider>,
}
impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		completion: Arc<dyn CompletionProvider>,
	) -> Self {
		Self { embedding, completion }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let providers = Arc::new(DefaultProviders);

		Self { embedding: providers.clone(), completion: providers }
	}
}

pub struct LegisService {
	pub cfg: Config,
	pub gateway: Arc<dyn RetrievalGateway>,
	pub profiles: Arc<dyn ProfileStore>,
	pub providers: Providers,
}
impl LegisService {
	pub fn new(cfg: Config, db: Db) -> Self {
		let providers = Providers::default();
		let gateway = Arc::new(QdrantGateway::new(&cfg, providers.embedding.clone()));
		let profiles = Arc::new(PgProfileStore::new(db));

		Self::with_providers(cfg, gateway, profiles, providers)
	}

	pub fn with_providers(
		cfg: Config,
		gateway: Arc<dyn RetrievalGateway>,
		profiles: Arc<dyn ProfileStore>,
		providers: Providers,
	) -> Self {
		Self { cfg, gateway, profiles, providers }
	}

	pub async fn warm_up(&self) -> Result<()> {
		self.gateway.warm_up().await
	}
}

struct DefaultProviders;
impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl CompletionProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(completion::complete(cfg, messages))
	}

	fn complete_stream<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<FragmentStream>> {
		Box::pin(completion::complete_stream(cfg, messages))
	}
}
