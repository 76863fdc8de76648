pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Search provider unavailable: {message}")]
	ProviderUnavailable { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<fiche_storage::Error> for Error {
	fn from(err: fiche_storage::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}
