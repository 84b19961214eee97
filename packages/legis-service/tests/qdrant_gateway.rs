use std::{path::PathBuf, sync::Arc};

use qdrant_client::{
	Payload,
	qdrant::{
		CreateCollectionBuilder, Distance, PointStruct, UpsertPointsBuilder, VectorParamsBuilder,
	},
};

use legis_config::{Config, EmbeddingProviderConfig};
use legis_service::{BoxFuture, EmbeddingProvider, QdrantGateway, RetrievalGateway};

struct AxisEmbedding;
impl EmbeddingProvider for AxisEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		let vectors = texts.iter().map(|_| vec![1.0, 0.0, 0.0, 0.0]).collect();

		Box::pin(async move { Ok(vectors) })
	}
}

fn gateway_config(url: &str, collection: &str) -> Config {
	let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
		.join("../legis-config/tests/fixtures/sample_config.toml");
	let mut cfg = legis_config::load(&path).expect("Failed to load sample config.");

	cfg.storage.qdrant.url = url.to_string();
	cfg.storage.qdrant.collection = collection.to_string();
	cfg.storage.qdrant.vector_dim = 4;
	cfg.providers.embedding.dimensions = 4;

	cfg
}

fn bill_point(id: u64, bill_id: &str, state: &str, vector: Vec<f32>) -> PointStruct {
	let mut payload = Payload::new();

	payload.insert("bill_id", bill_id);
	payload.insert("title", format!("{bill_id} title"));
	payload.insert("state", state);
	payload.insert("category", "Private Sector Use;Effect on Labor/Employment");
	payload.insert("date", "2024-05-01");
	payload.insert("text", "An act concerning automated employment decision tools.");

	PointStruct::new(id, vector, payload)
}

#[tokio::test]
#[ignore = "Requires external Qdrant. Set LEGIS_QDRANT_URL to run."]
async fn gateway_searches_globally_and_by_jurisdiction() {
	let Some(url) = legis_testkit::env_qdrant_url() else {
		eprintln!("Skipping gateway_searches_globally_and_by_jurisdiction; set LEGIS_QDRANT_URL.");

		return;
	};
	let collection =
		legis_testkit::TestCollection::new(&url, "legis_bills_test").expect("Qdrant client.");

	collection
		.client
		.create_collection(
			CreateCollectionBuilder::new(collection.name.clone())
				.vectors_config(VectorParamsBuilder::new(4, Distance::Cosine)),
		)
		.await
		.expect("Failed to create collection.");
	collection
		.client
		.upsert_points(
			UpsertPointsBuilder::new(
				collection.name.clone(),
				vec![
					bill_point(1, "CA-1", "CA", vec![1.0, 0.0, 0.0, 0.0]),
					bill_point(2, "TX-1", "TX", vec![0.9, 0.1, 0.0, 0.0]),
					bill_point(3, "NY-1", "New York", vec![0.1, 0.9, 0.0, 0.0]),
				],
			)
			.wait(true),
		)
		.await
		.expect("Failed to upsert points.");

	let gateway = QdrantGateway::new(&gateway_config(&url, &collection.name), Arc::new(AxisEmbedding));

	gateway.warm_up().await.expect("Warm-up failed.");
	gateway.warm_up().await.expect("Second warm-up failed.");

	let global = gateway.search_global("bias audit", 2).await.expect("Global search failed.");
	let global_ids: Vec<_> = global.iter().map(|c| c.bill_id.as_str()).collect();

	assert_eq!(global_ids, vec!["CA-1", "TX-1"]);
	assert!(global[0].categories.contains("private sector use"));

	let ny = gateway.search_jurisdiction("bias audit", "ny", 5).await.expect("Filtered search.");

	assert_eq!(ny.len(), 1);
	assert_eq!(ny[0].bill_id, "NY-1");
	assert!(gateway.search_jurisdiction("bias audit", " ", 5).await.expect("Blank.").is_empty());

	collection.cleanup().await.expect("Failed to clean up collection.");
}
