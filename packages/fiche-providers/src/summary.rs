use serde::Deserialize;
use url::Url;

use fiche_config::SummaryProviderConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Summary {
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub extract: String,
}

/// Returns the decoded article identifier when `raw` points into a recognized encyclopedia.
///
/// The identifier is every path segment after the marker segment, decoded and rejoined with
/// `/`, so titles such as `AC/DC` survive.
pub fn article_title(cfg: &SummaryProviderConfig, raw: &str) -> Option<String> {
	let url = Url::parse(raw).ok()?;
	let host = url.host_str()?.to_ascii_lowercase();

	if !cfg.domains.iter().any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
	{
		return None;
	}

	let segments: Vec<&str> = url.path_segments()?.collect();
	let marker = segments.iter().position(|segment| *segment == cfg.marker)?;
	let title = segments[marker + 1..]
		.iter()
		.filter(|segment| !segment.is_empty())
		.map(|segment| {
			urlencoding::decode(segment)
				.map(|decoded| decoded.into_owned())
				.unwrap_or_else(|_| segment.to_string())
		})
		.collect::<Vec<_>>()
		.join("/");

	(!title.is_empty()).then_some(title)
}

pub async fn fetch_summary(cfg: &SummaryProviderConfig, title: &str) -> crate::Result<Summary> {
	let client = crate::client(cfg.timeout_ms, None)?;
	let url = format!("{}{}{}", cfg.api_base, cfg.path, urlencoding::encode(title));
	let res = client.get(&url).send().await?;
	let summary: Summary = res.error_for_status()?.json().await?;

	Ok(summary)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cfg() -> SummaryProviderConfig {
		SummaryProviderConfig {
			api_base: "https://en.wikipedia.org".to_string(),
			path: "/api/rest_v1/page/summary/".to_string(),
			domains: vec!["wikipedia.org".to_string()],
			marker: "wiki".to_string(),
			timeout_ms: None,
		}
	}

	#[test]
	fn extracts_titles_after_the_marker() {
		assert_eq!(
			article_title(&cfg(), "https://en.wikipedia.org/wiki/Cat").as_deref(),
			Some("Cat")
		);
		assert_eq!(
			article_title(&cfg(), "https://en.m.wikipedia.org/wiki/Caf%C3%A9_society").as_deref(),
			Some("Café_society")
		);
		assert_eq!(article_title(&cfg(), "https://en.wikipedia.org/wiki/AC/DC").as_deref(), Some("AC/DC"));
	}

	#[test]
	fn ignores_other_domains_and_markerless_paths() {
		assert_eq!(article_title(&cfg(), "https://example.org/wiki/Cat"), None);
		assert_eq!(article_title(&cfg(), "https://notwikipedia.org/wiki/Cat"), None);
		assert_eq!(article_title(&cfg(), "https://en.wikipedia.org/?curid=6678"), None);
		assert_eq!(article_title(&cfg(), "https://en.wikipedia.org/wiki/"), None);
		assert_eq!(article_title(&cfg(), "not a url"), None);
	}
}
