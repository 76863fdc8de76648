use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use fiche_config::DocumentProviderConfig;

/// Downloads `url` and returns at most `max_bytes` of its body.
pub async fn fetch_document(cfg: &DocumentProviderConfig, url: &str) -> crate::Result<Vec<u8>> {
	let url = Url::parse(url)?;

	if !matches!(url.scheme(), "http" | "https") {
		return Err(crate::Error::UnsupportedScheme { url: url.to_string() });
	}

	let client = crate::client(cfg.timeout_ms, Some(&cfg.user_agent))?;
	let res = client.get(url).header(ACCEPT, "text/html,application/xhtml+xml").send().await?;
	let mut res = res.error_for_status()?;
	let content_type = res
		.headers()
		.get(CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.unwrap_or_default()
		.to_ascii_lowercase();

	if !content_type.is_empty() && !content_type.contains("html") && !content_type.contains("xml")
	{
		return Err(crate::Error::InvalidResponse {
			message: format!("Unsupported document content type: {content_type}."),
		});
	}

	let mut body = Vec::new();

	while let Some(chunk) = res.chunk().await? {
		body.extend_from_slice(&chunk);

		if body.len() >= cfg.max_bytes {
			break;
		}
	}

	body.truncate(cfg.max_bytes);

	Ok(body)
}
