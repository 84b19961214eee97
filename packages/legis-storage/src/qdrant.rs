use crate::Result;

pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub vector_dim: u32,
}
impl QdrantStore {
	pub fn new(cfg: &legis_config::Qdrant) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client, collection: cfg.collection.clone(), vector_dim: cfg.vector_dim })
	}

	/// Number of indexed bills. Fails when the collection does not exist.
	pub async fn point_count(&self) -> Result<u64> {
		let info = self.client.collection_info(self.collection.clone()).await?;

		Ok(info.result.and_then(|result| result.points_count).unwrap_or(0))
	}
}
