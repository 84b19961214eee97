use time::OffsetDateTime;
use uuid::Uuid;

use legis_config::Postgres;
use legis_storage::{db::Db, models::Profile, sessions};

#[tokio::test]
#[ignore = "Requires external Postgres. Set LEGIS_PG_DSN to run."]
async fn profiles_round_trip_through_postgres() {
	let Some(base_dsn) = legis_testkit::env_dsn() else {
		eprintln!("Skipping profiles_round_trip_through_postgres; set LEGIS_PG_DSN to run this test.");

		return;
	};

	legis_testkit::with_test_db(&base_dsn, |test_db| {
		let dsn = test_db.dsn().to_string();

		async move {
			let db = Db::connect(&Postgres { dsn, pool_max_conns: 1 })
				.await
				.map_err(|err| legis_testkit::Error::Message(err.to_string()))?;

			db.ensure_schema().await.map_err(|err| legis_testkit::Error::Message(err.to_string()))?;
			// Bootstrapping twice must be harmless.
			db.ensure_schema().await.map_err(|err| legis_testkit::Error::Message(err.to_string()))?;

			let session_id = Uuid::new_v4();
			let profile = Profile {
				company_size: Some("51-200".to_string()),
				industry: Some("Retail".to_string()),
				state: Some("New York".to_string()),
				categories: vec!["private sector use".to_string()],
			};

			sessions::insert_profile(&db.pool, session_id, &profile, OffsetDateTime::now_utc())
				.await
				.map_err(|err| legis_testkit::Error::Message(err.to_string()))?;

			let stored = sessions::get_profile(&db.pool, session_id)
				.await
				.map_err(|err| legis_testkit::Error::Message(err.to_string()))?;
			let missing = sessions::get_profile(&db.pool, Uuid::new_v4())
				.await
				.map_err(|err| legis_testkit::Error::Message(err.to_string()))?;

			assert_eq!(stored, Some(profile));
			assert!(missing.is_none());

			db.pool.close().await;

			Ok(())
		}
	})
	.await
	.expect("Postgres round trip failed.");
}
