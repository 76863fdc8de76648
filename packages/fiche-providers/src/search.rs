use serde_json::Value;

use fiche_config::SearchProviderConfig;

/// Sends `text` to the search provider and returns the raw payload.
pub async fn search(cfg: &SearchProviderConfig, text: &str) -> crate::Result<Value> {
	let client = crate::client(cfg.timeout_ms, None)?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let mut query: Vec<(&str, &str)> =
		cfg.params.iter().map(|(key, value)| (key.as_str(), value.as_str())).collect();

	query.push((cfg.query_param.as_str(), text));

	let res = client.get(&url).query(&query).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	Ok(json)
}
