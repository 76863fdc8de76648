pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	Url(#[from] url::ParseError),
	#[error("Unsupported URL scheme: {url}.")]
	UnsupportedScheme { url: String },
	#[error("{message}")]
	InvalidResponse { message: String },
}
