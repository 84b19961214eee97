use time::OffsetDateTime;
use uuid::Uuid;

use crate::{BoxFuture, ProfileStore, Result};
use legis_storage::{db::Db, models::Profile, sessions};

/// Session profiles persisted in the `legis_sessions` table.
pub struct PgProfileStore {
	db: Db,
}
impl PgProfileStore {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}

impl ProfileStore for PgProfileStore {
	fn get_profile<'a>(&'a self, session_id: &'a str) -> BoxFuture<'a, Result<Option<Profile>>> {
		Box::pin(async move {
			let Ok(session_id) = Uuid::parse_str(session_id.trim()) else {
				return Ok(None);
			};

			Ok(sessions::get_profile(&self.db.pool, session_id).await?)
		})
	}

	fn save_profile<'a>(
		&'a self,
		session_id: Uuid,
		profile: &'a Profile,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			sessions::insert_profile(&self.db.pool, session_id, profile, OffsetDateTime::now_utc())
				.await?;

			Ok(())
		})
	}
}
