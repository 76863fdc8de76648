pub mod document;
pub mod html;
pub mod search;
pub mod summary;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::Client;

pub(crate) fn client(timeout_ms: Option<u64>, user_agent: Option<&str>) -> Result<Client> {
	let mut builder = Client::builder();

	if let Some(timeout_ms) = timeout_ms {
		builder = builder.timeout(Duration::from_millis(timeout_ms));
	}
	if let Some(user_agent) = user_agent {
		builder = builder.user_agent(user_agent);
	}

	Ok(builder.build()?)
}
