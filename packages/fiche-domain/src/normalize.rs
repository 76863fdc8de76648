//! Maps raw search provider payloads into canonical, url-keyed results.
//!
//! Two payload shapes are understood:
//! - an array of `[score, url]` pairs, kept in provider order;
//! - a collection of page objects (`pageid`, `title`, `extract`, `index`) found at
//!   `query.pages`, `pages`, or the top level, sorted by `index`.

use std::collections::HashSet;

use serde_json::{Map, Value};
use url::Url;

use crate::results::SearchResult;

#[derive(Debug, thiserror::Error)]
#[error("Malformed search payload: {message}")]
pub struct MalformedPayload {
	pub message: String,
}
impl MalformedPayload {
	fn new(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}
}

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
	/// Prefix for page-object URLs; the encoded page title is appended to it.
	pub article_url_base: String,
}

struct PageEntry {
	index: u64,
	result: SearchResult,
}

pub fn normalize(
	payload: &Value,
	opts: &NormalizeOptions,
) -> Result<Vec<SearchResult>, MalformedPayload> {
	let results = match payload {
		Value::Array(pairs) => normalize_pairs(pairs)?,
		Value::Object(object) => normalize_pages(locate_pages(object)?, opts),
		other => {
			return Err(MalformedPayload::new(format!(
				"expected an array or object, found {}",
				kind_of(other)
			)));
		},
	};

	Ok(dedup_by_url(results))
}

/// Derives a readable title from a URL path.
///
/// Takes the trailing path segment (an `index` segment defers to its parent), replaces `-` and
/// `_` with spaces and capitalizes each word. URLs that do not parse are returned verbatim.
pub fn fallback_title(raw: &str) -> String {
	let Ok(parsed) = Url::parse(raw) else {
		return raw.to_string();
	};
	let segments: Vec<String> = parsed
		.path_segments()
		.map(|segments| {
			segments
				.filter(|segment| !segment.is_empty())
				.map(|segment| {
					urlencoding::decode(segment)
						.map(|decoded| decoded.into_owned())
						.unwrap_or_else(|_| segment.to_string())
				})
				.collect()
		})
		.unwrap_or_default();
	let source = segments
		.iter()
		.rev()
		.find(|segment| !is_index_segment(segment))
		.map(String::as_str)
		.or_else(|| parsed.host_str());
	let Some(source) = source else {
		return raw.to_string();
	};
	let title = capitalize_words(&source.replace(['-', '_'], " "));

	if title.is_empty() { raw.to_string() } else { title }
}

fn normalize_pairs(pairs: &[Value]) -> Result<Vec<SearchResult>, MalformedPayload> {
	pairs
		.iter()
		.enumerate()
		.map(|(position, pair)| {
			let entry = pair.as_array().filter(|entry| entry.len() >= 2).ok_or_else(|| {
				MalformedPayload::new(format!("entry {position} is not a [score, url] pair"))
			})?;

			if !entry[0].is_number() {
				return Err(MalformedPayload::new(format!("entry {position} has a non-numeric score")));
			}

			let url = entry[1]
				.as_str()
				.map(str::trim)
				.filter(|url| !url.is_empty())
				.ok_or_else(|| MalformedPayload::new(format!("entry {position} has no url")))?;

			Ok(SearchResult::new(url, fallback_title(url)))
		})
		.collect()
}

fn locate_pages(object: &Map<String, Value>) -> Result<Vec<&Value>, MalformedPayload> {
	if let Some(pages) = object.get("query").and_then(|query| query.get("pages")) {
		return page_values(pages);
	}
	if let Some(pages) = object.get("pages") {
		return page_values(pages);
	}

	let looks_like_pages = !object.is_empty()
		&& object.values().all(|value| {
			value.get("pageid").is_some() || value.get("title").and_then(Value::as_str).is_some()
		});

	// Anything else is the provider's "no hits" reply, e.g. `{"batchcomplete": ""}`.
	if looks_like_pages { Ok(object.values().collect()) } else { Ok(Vec::new()) }
}

fn page_values(pages: &Value) -> Result<Vec<&Value>, MalformedPayload> {
	match pages {
		Value::Object(map) => Ok(map.values().collect()),
		Value::Array(items) => Ok(items.iter().collect()),
		Value::Null => Ok(Vec::new()),
		other => Err(MalformedPayload::new(format!(
			"expected page objects, found {}",
			kind_of(other)
		))),
	}
}

fn normalize_pages(pages: Vec<&Value>, opts: &NormalizeOptions) -> Vec<SearchResult> {
	let mut entries: Vec<PageEntry> =
		pages.into_iter().filter_map(|page| page_entry(page, opts)).collect();

	entries.sort_by_key(|entry| entry.index);

	entries.into_iter().map(|entry| entry.result).collect()
}

fn page_entry(page: &Value, opts: &NormalizeOptions) -> Option<PageEntry> {
	let title = page.get("title").and_then(Value::as_str).map(str::trim).filter(|t| !t.is_empty());
	let page_id = page.get("pageid").and_then(Value::as_u64);
	let (url, title) = match (title, page_id) {
		(Some(title), _) => (
			format!("{}{}", opts.article_url_base, urlencoding::encode(&title.replace(' ', "_"))),
			title.to_string(),
		),
		(None, Some(page_id)) =>
			(format!("{}?curid={page_id}", opts.article_url_base), format!("Page {page_id}")),
		(None, None) => return None,
	};
	let description = page.get("extract").and_then(Value::as_str).unwrap_or_default().trim();
	let index = page.get("index").and_then(Value::as_u64).unwrap_or(u64::MAX);
	let mut result = SearchResult::new(url, title);

	result.description = description.to_string();

	Some(PageEntry { index, result })
}

fn dedup_by_url(results: Vec<SearchResult>) -> Vec<SearchResult> {
	let mut seen = HashSet::new();

	results.into_iter().filter(|result| seen.insert(result.url.clone())).collect()
}

fn is_index_segment(segment: &str) -> bool {
	segment == "index" || segment.starts_with("index.")
}

fn capitalize_words(text: &str) -> String {
	text.split_whitespace()
		.map(|word| {
			let mut chars = word.chars();

			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}

fn kind_of(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}
