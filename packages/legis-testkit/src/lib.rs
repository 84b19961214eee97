mod error;

pub use error::{Error, Result};

use std::{env, future::Future, str::FromStr, thread, time::Duration};

use qdrant_client::Qdrant;
use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::{runtime::Builder, time};
use uuid::Uuid;

const ADMIN_DATABASES: [&str; 2] = ["postgres", "template1"];
const COLLECTION_DELETE_ATTEMPTS: u32 = 4;

/// A Postgres database created for one test. It is dropped when the test finishes,
/// and on unwind through [`Drop`] if the test panics first.
pub struct TestDatabase {
	name: String,
	dsn: String,
	admin: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	async fn create(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn)?;
		let (admin, mut conn) = connect_admin(&base).await?;
		let name = format!("legis_test_{}", Uuid::new_v4().simple());

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str()).await?;

		let dsn = base.database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, admin, dropped: false })
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	async fn drop_now(&mut self) -> Result<()> {
		if !self.dropped {
			drop_database(&self.name, &self.admin).await?;

			self.dropped = true;
		}

		Ok(())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let name = self.name.clone();
		let admin = self.admin.clone();
		// Cleanup runs on its own runtime.
		let handle = thread::spawn(move || {
			let outcome = Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(|err| Error::Message(err.to_string()))
				.and_then(|runtime| runtime.block_on(drop_database(&name, &admin)));

			if let Err(err) = outcome {
				eprintln!("Failed to drop test database {name}: {err}.");
			}
		});

		let _ = handle.join();
	}
}

/// A uniquely named Qdrant collection. Tests create it themselves and call
/// [`TestCollection::cleanup`] when done.
pub struct TestCollection {
	pub client: Qdrant,
	pub name: String,
}
impl TestCollection {
	pub fn new(qdrant_url: &str, prefix: &str) -> Result<Self> {
		let client = Qdrant::from_url(qdrant_url).build()?;

		Ok(Self { client, name: format!("{prefix}_{}", Uuid::new_v4().simple()) })
	}

	pub async fn cleanup(self) -> Result<()> {
		let mut delay = Duration::from_millis(200);
		let mut attempt = 1;

		loop {
			match self.client.delete_collection(self.name.clone()).await {
				Ok(_) => return Ok(()),
				Err(err) if attempt == COLLECTION_DELETE_ATTEMPTS => return Err(err.into()),
				Err(_) => {
					time::sleep(delay).await;

					delay *= 2;
					attempt += 1;
				},
			}
		}
	}
}

pub fn env_dsn() -> Option<String> {
	env::var("LEGIS_PG_DSN").ok()
}

pub fn env_qdrant_url() -> Option<String> {
	env::var("LEGIS_QDRANT_URL").ok()
}

/// Runs `f` against a fresh database and drops the database afterwards.
///
/// A failure to drop only surfaces when `f` itself succeeded.
pub async fn with_test_db<F, Fut, T>(base_dsn: &str, f: F) -> Result<T>
where
	F: FnOnce(&TestDatabase) -> Fut,
	Fut: Future<Output = Result<T>>,
{
	let mut db = TestDatabase::create(base_dsn).await?;
	let result = f(&db).await;
	let cleanup = db.drop_now().await;

	match (result, cleanup) {
		(Ok(value), Ok(())) => Ok(value),
		(Ok(_), Err(err)) => Err(err),
		(Err(err), _) => Err(err),
	}
}

async fn connect_admin(base: &PgConnectOptions) -> Result<(PgConnectOptions, PgConnection)> {
	let mut last_err = None;

	for database in ADMIN_DATABASES {
		let options = base.clone().database(database);

		match PgConnection::connect_with(&options).await {
			Ok(conn) => return Ok((options, conn)),
			Err(err) => last_err = Some(err),
		}
	}

	Err(match last_err {
		Some(err) => err.into(),
		None => Error::Message("No admin database to connect to.".to_string()),
	})
}

async fn drop_database(name: &str, admin: &PgConnectOptions) -> Result<()> {
	let mut conn = PgConnection::connect_with(admin).await?;

	sqlx::query(
		"\
SELECT pg_terminate_backend(pid)
FROM pg_stat_activity
WHERE datname = $1 AND pid <> pg_backend_pid()",
	)
	.bind(name)
	.fetch_all(&mut conn)
	.await?;
	conn.execute(format!(r#"DROP DATABASE IF EXISTS "{name}""#).as_str()).await?;

	Ok(())
}
