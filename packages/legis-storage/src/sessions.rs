use sqlx::PgExecutor;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Result,
	models::{Profile, SessionRow},
};

pub async fn insert_profile<'e, E>(
	executor: E,
	session_id: Uuid,
	profile: &Profile,
	now: OffsetDateTime,
) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
INSERT INTO legis_sessions (session_id, company_size, industry, state, categories, created_at)
VALUES ($1,$2,$3,$4,$5,$6)",
	)
	.bind(session_id)
	.bind(profile.company_size.as_deref())
	.bind(profile.industry.as_deref())
	.bind(profile.state.as_deref())
	.bind(profile.categories.as_slice())
	.bind(now)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn get_profile<'e, E>(executor: E, session_id: Uuid) -> Result<Option<Profile>>
where
	E: PgExecutor<'e>,
{
	let row: Option<SessionRow> = sqlx::query_as(
		"\
SELECT session_id, company_size, industry, state, categories, created_at
FROM legis_sessions
WHERE session_id = $1",
	)
	.bind(session_id)
	.fetch_optional(executor)
	.await?;

	Ok(row.map(Profile::from))
}
