pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Qdrant error: {message}")]
	Qdrant { message: String },
	#[error("Internal error: {message}")]
	Internal { message: String },
}
impl From<legis_storage::Error> for Error {
	fn from(err: legis_storage::Error) -> Self {
		match err {
			legis_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			legis_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			legis_storage::Error::NotFound(message) => Self::NotFound { message },
			legis_storage::Error::Qdrant(inner) => Self::Qdrant { message: inner.to_string() },
		}
	}
}

impl From<qdrant_client::QdrantError> for Error {
	fn from(err: qdrant_client::QdrantError) -> Self {
		Self::Qdrant { message: err.to_string() }
	}
}

impl From<color_eyre::Report> for Error {
	fn from(err: color_eyre::Report) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
