use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Onboarding answers for one session. Written once, read on every chat turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
	pub company_size: Option<String>,
	pub industry: Option<String>,
	pub state: Option<String>,
	#[serde(default)]
	pub categories: Vec<String>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct SessionRow {
	pub session_id: Uuid,
	pub company_size: Option<String>,
	pub industry: Option<String>,
	pub state: Option<String>,
	pub categories: Vec<String>,
	pub created_at: OffsetDateTime,
}
impl From<SessionRow> for Profile {
	fn from(row: SessionRow) -> Self {
		Self {
			company_size: row.company_size,
			industry: row.industry,
			state: row.state,
			categories: row.categories,
		}
	}
}
