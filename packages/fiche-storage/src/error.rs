#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to access store file at {path:?}.")]
	Io { path: std::path::PathBuf, source: std::io::Error },
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("Corrupt store: {message}")]
	Corrupt { message: String },
}
