use std::sync::Arc;

use qdrant_client::qdrant::{Query, QueryPointsBuilder};
use tokio::sync::OnceCell;

use crate::{
	BoxFuture, EmbeddingProvider, Error, Result, RetrievalGateway,
	candidate::Candidate,
	retrieval::{self, candidate_from_point},
};
use legis_config::{Config, EmbeddingProviderConfig, Retrieval};
use legis_storage::qdrant::QdrantStore;

/// Retrieval gateway backed by a Qdrant collection of bill embeddings.
///
/// The Qdrant handle is created on first use. Concurrent first callers wait on the same
/// initialization, so the index is opened once per gateway.
pub struct QdrantGateway {
	qdrant: legis_config::Qdrant,
	embedding: EmbeddingProviderConfig,
	retrieval: Retrieval,
	embedder: Arc<dyn EmbeddingProvider>,
	index: OnceCell<BillIndex>,
}

struct BillIndex {
	store: QdrantStore,
	point_count: u64,
}

impl QdrantGateway {
	pub fn new(cfg: &Config, embedder: Arc<dyn EmbeddingProvider>) -> Self {
		Self {
			qdrant: cfg.storage.qdrant.clone(),
			embedding: cfg.providers.embedding.clone(),
			retrieval: cfg.retrieval.clone(),
			embedder,
			index: OnceCell::new(),
		}
	}

	async fn index(&self) -> Result<&BillIndex> {
		self.index
			.get_or_try_init(|| async {
				let store = QdrantStore::new(&self.qdrant)?;
				let point_count = store.point_count().await?;

				tracing::info!(
					collection = %self.qdrant.collection,
					point_count,
					"Bill index opened."
				);

				Ok::<_, Error>(BillIndex { store, point_count })
			})
			.await
	}

	async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
		let prefix = self.embedding.query_prefix.as_deref().unwrap_or_default();
		let texts = vec![format!("{prefix}{query}")];
		let mut vectors = self.embedder.embed(&self.embedding, &texts).await?;
		let vector = vectors.pop().ok_or_else(|| Error::Provider {
			message: "Embedding provider returned no vectors.".to_string(),
		})?;

		if vector.len() != self.qdrant.vector_dim as usize {
			return Err(Error::Provider {
				message: format!(
					"Embedding dimension mismatch: expected {}, got {}.",
					self.qdrant.vector_dim,
					vector.len()
				),
			});
		}

		Ok(vector)
	}

	async fn nearest(&self, query: &str, limit: u64) -> Result<Vec<Candidate>> {
		let index = self.index().await?;

		if limit == 0 || index.point_count == 0 {
			return Ok(Vec::new());
		}

		let vector = self.embed_query(query).await?;
		let search = QueryPointsBuilder::new(index.store.collection.clone())
			.query(Query::new_nearest(vector))
			.with_payload(true)
			.limit(limit);
		let response = index.store.client.query(search).await?;
		let snippet_max = self.retrieval.snippet_max_chars as usize;

		Ok(response
			.result
			.iter()
			.filter_map(|point| candidate_from_point(point, snippet_max))
			.collect())
	}
}

impl RetrievalGateway for QdrantGateway {
	fn warm_up(&self) -> BoxFuture<'_, Result<()>> {
		Box::pin(async move {
			self.index().await?;

			Ok(())
		})
	}

	fn search_global<'a>(&'a self, query: &'a str, k: u32) -> BoxFuture<'a, Result<Vec<Candidate>>> {
		Box::pin(self.nearest(query, u64::from(k)))
	}

	fn search_jurisdiction<'a>(
		&'a self,
		query: &'a str,
		jurisdiction: &'a str,
		k: u32,
	) -> BoxFuture<'a, Result<Vec<Candidate>>> {
		Box::pin(async move {
			if jurisdiction.trim().is_empty() || k == 0 {
				return Ok(Vec::new());
			}

			let corpus_size = self.index().await?.point_count;
			let limit = retrieval::widened_limit(
				k,
				self.retrieval.widen_factor,
				self.retrieval.widen_min,
				corpus_size,
			);
			let pool = self.nearest(query, limit).await?;

			Ok(retrieval::filter_by_jurisdiction(pool, jurisdiction, k))
		})
	}
}
