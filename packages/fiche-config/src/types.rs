use std::{collections::BTreeMap, path::PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub providers: Providers,
	pub storage: Storage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub log_level: String,
	/// Launch the system browser when a result or article is opened.
	#[serde(default)]
	pub open_in_browser: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub search: SearchProviderConfig,
	pub summary: SummaryProviderConfig,
	pub document: DocumentProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchProviderConfig {
	pub api_base: String,
	pub path: String,
	/// Name of the query parameter that carries the URL-encoded query text.
	pub query_param: String,
	/// Prefix used to build result URLs from page objects, e.g. "https://en.wikipedia.org/wiki/".
	pub article_url_base: String,
	/// Static query parameters sent with every search request.
	#[serde(default)]
	pub params: BTreeMap<String, String>,
	/// Optional. Absent means the request never times out.
	pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryProviderConfig {
	pub api_base: String,
	/// Appended to `api_base`; the encoded article title follows it directly.
	pub path: String,
	/// Hosts (and their subdomains) served by the summary endpoint.
	pub domains: Vec<String>,
	/// Path segment that precedes the article identifier, e.g. "wiki".
	pub marker: String,
	pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentProviderConfig {
	#[serde(default = "default_user_agent")]
	pub user_agent: String,
	#[serde(default = "default_max_bytes")]
	pub max_bytes: usize,
	pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub path: PathBuf,
	#[serde(default = "default_history_key")]
	pub key: String,
}

fn default_user_agent() -> String {
	concat!("fiche/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_max_bytes() -> usize {
	2 * 1_024 * 1_024
}

fn default_history_key() -> String {
	"searchHistory".to_string()
}
