use std::sync::Arc;

use legis_service::LegisService;
use legis_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<LegisService>,
}
impl AppState {
	/// Connects storage and opens the bill index. Any failure here aborts startup.
	pub async fn new(config: legis_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = LegisService::new(config, db);

		service.warm_up().await?;

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: LegisService) -> Self {
		Self { service: Arc::new(service) }
	}
}
