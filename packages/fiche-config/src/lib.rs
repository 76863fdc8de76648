mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, DocumentProviderConfig, Providers, SearchProviderConfig, Service, Storage,
	SummaryProviderConfig,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	for (label, value) in [
		("providers.search.api_base", &cfg.providers.search.api_base),
		("providers.search.path", &cfg.providers.search.path),
		("providers.search.query_param", &cfg.providers.search.query_param),
		("providers.search.article_url_base", &cfg.providers.search.article_url_base),
		("providers.summary.api_base", &cfg.providers.summary.api_base),
		("providers.summary.path", &cfg.providers.summary.path),
		("providers.summary.marker", &cfg.providers.summary.marker),
		("providers.document.user_agent", &cfg.providers.document.user_agent),
		("storage.key", &cfg.storage.key),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	for (label, value) in [
		("providers.search.api_base", &cfg.providers.search.api_base),
		("providers.search.article_url_base", &cfg.providers.search.article_url_base),
		("providers.summary.api_base", &cfg.providers.summary.api_base),
	] {
		if !is_http_url(value) {
			return Err(Error::Validation {
				message: format!("{label} must start with http:// or https://."),
			});
		}
	}

	if cfg.providers.summary.marker.contains('/') {
		return Err(Error::Validation {
			message: "providers.summary.marker must be a single path segment.".to_string(),
		});
	}
	if cfg.providers.summary.domains.is_empty() {
		return Err(Error::Validation {
			message: "providers.summary.domains must be non-empty.".to_string(),
		});
	}
	if cfg.providers.summary.domains.iter().any(|domain| domain.is_empty()) {
		return Err(Error::Validation {
			message: "providers.summary.domains must not contain empty entries.".to_string(),
		});
	}
	if cfg.providers.document.max_bytes == 0 {
		return Err(Error::Validation {
			message: "providers.document.max_bytes must be greater than zero.".to_string(),
		});
	}

	for (label, timeout) in [
		("providers.search.timeout_ms", cfg.providers.search.timeout_ms),
		("providers.summary.timeout_ms", cfg.providers.summary.timeout_ms),
		("providers.document.timeout_ms", cfg.providers.document.timeout_ms),
	] {
		if timeout == Some(0) {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero when set."),
			});
		}
	}

	if cfg.storage.path.as_os_str().is_empty() {
		return Err(Error::Validation { message: "storage.path must be non-empty.".to_string() });
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.log_level = cfg.service.log_level.trim().to_string();
	cfg.providers.search.api_base = cfg.providers.search.api_base.trim().to_string();
	cfg.providers.search.query_param = cfg.providers.search.query_param.trim().to_string();
	cfg.providers.search.article_url_base =
		cfg.providers.search.article_url_base.trim().to_string();
	cfg.providers.summary.api_base = cfg.providers.summary.api_base.trim().to_string();
	cfg.providers.summary.marker =
		cfg.providers.summary.marker.trim().trim_matches('/').to_string();
	cfg.providers.summary.domains = cfg
		.providers
		.summary
		.domains
		.iter()
		.map(|domain| domain.trim().trim_start_matches('.').to_ascii_lowercase())
		.collect();
	cfg.storage.key = cfg.storage.key.trim().to_string();
}

fn is_http_url(value: &str) -> bool {
	value.starts_with("http://") || value.starts_with("https://")
}
