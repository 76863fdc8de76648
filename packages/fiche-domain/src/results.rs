//! Transient search results and the pure transitions that publish and enrich them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
	/// Identity key.
	pub url: String,
	pub title: String,
	pub description: String,
	pub logo_url: Option<String>,
	pub enriched: bool,
}
impl SearchResult {
	pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			title: title.into(),
			description: String::new(),
			logo_url: None,
			enriched: false,
		}
	}
}

/// Metadata fetched for one result URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Enrichment {
	pub url: String,
	pub title: String,
	pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
	#[default]
	Idle,
	Searching,
	/// Published, some results still awaiting metadata.
	Partial,
	/// Every result currently published has been enriched.
	Complete,
	Error,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultsState {
	pub query: String,
	/// Bumped on every search; a primary response only publishes over its own generation.
	pub generation: u64,
	pub phase: SearchPhase,
	pub loading: bool,
	pub error: Option<String>,
	pub results: Vec<SearchResult>,
}
impl ResultsState {
	pub fn searching(&self, query: &str) -> Self {
		Self {
			query: query.to_string(),
			generation: self.generation + 1,
			phase: SearchPhase::Searching,
			loading: true,
			error: None,
			results: Vec::new(),
		}
	}

	/// Returns `None` when a newer search has started since `generation`.
	pub fn published(&self, generation: u64, results: Vec<SearchResult>) -> Option<Self> {
		if generation != self.generation {
			return None;
		}

		Some(Self {
			query: self.query.clone(),
			generation,
			phase: phase_of(&results),
			loading: false,
			error: None,
			results,
		})
	}

	pub fn failed(&self, generation: u64, message: impl Into<String>) -> Option<Self> {
		if generation != self.generation {
			return None;
		}

		Some(Self {
			query: self.query.clone(),
			generation,
			phase: SearchPhase::Error,
			loading: false,
			error: Some(message.into()),
			results: Vec::new(),
		})
	}

	pub fn enriched(&self, enrichment: &Enrichment) -> Self {
		let results = merge_enrichment(&self.results, enrichment);
		let phase = match self.phase {
			SearchPhase::Partial | SearchPhase::Complete => phase_of(&results),
			phase => phase,
		};

		Self { results, phase, ..self.clone() }
	}
}

/// Folds one enrichment into the latest results.
///
/// Entries are matched by `url`; a url no longer present is dropped. An empty fetched title
/// keeps the current title, while the fetched description always replaces the current one.
pub fn merge_enrichment(results: &[SearchResult], enrichment: &Enrichment) -> Vec<SearchResult> {
	results
		.iter()
		.map(|result| {
			if result.url != enrichment.url {
				return result.clone();
			}

			let title = if enrichment.title.is_empty() {
				result.title.clone()
			} else {
				enrichment.title.clone()
			};

			SearchResult {
				title,
				description: enrichment.description.clone(),
				enriched: true,
				..result.clone()
			}
		})
		.collect()
}

fn phase_of(results: &[SearchResult]) -> SearchPhase {
	if results.iter().all(|result| result.enriched) {
		SearchPhase::Complete
	} else {
		SearchPhase::Partial
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Vec<SearchResult> {
		vec![SearchResult::new("https://site/a", "A"), SearchResult::new("https://site/b", "B")]
	}

	fn enrichment(url: &str, title: &str, description: &str) -> Enrichment {
		Enrichment {
			url: url.to_string(),
			title: title.to_string(),
			description: description.to_string(),
		}
	}

	#[test]
	fn merge_is_idempotent() {
		let update = enrichment("https://site/b", "Bee", "About bees.");
		let once = merge_enrichment(&sample(), &update);
		let twice = merge_enrichment(&once, &update);

		assert_eq!(once, twice);
	}

	#[test]
	fn merges_of_different_urls_commute() {
		let a = enrichment("https://site/a", "Ant", "About ants.");
		let b = enrichment("https://site/b", "Bee", "About bees.");
		let ab = merge_enrichment(&merge_enrichment(&sample(), &a), &b);
		let ba = merge_enrichment(&merge_enrichment(&sample(), &b), &a);

		assert_eq!(ab, ba);
	}

	#[test]
	fn empty_title_keeps_fallback_but_description_is_replaced() {
		let mut results = sample();

		results[0].description = "stale".to_string();

		let merged = merge_enrichment(&results, &enrichment("https://site/a", "", ""));

		assert_eq!(merged[0].title, "A");
		assert_eq!(merged[0].description, "");
		assert!(merged[0].enriched);
		assert!(!merged[1].enriched);
	}

	#[test]
	fn unknown_url_is_dropped() {
		let merged = merge_enrichment(&sample(), &enrichment("https://site/x", "X", "gone"));

		assert_eq!(merged, sample());
	}

	#[test]
	fn stale_generation_does_not_publish() {
		let state = ResultsState::default().searching("cats");
		let newer = state.searching("dogs");

		assert!(newer.published(state.generation, sample()).is_none());
		assert!(newer.failed(state.generation, "boom").is_none());
		assert!(newer.published(newer.generation, sample()).is_some());
	}

	#[test]
	fn starting_a_search_drops_previous_results() {
		let state = ResultsState::default().searching("cats");
		let state = state.published(state.generation, sample()).expect("publish failed");
		let next = state.searching("dogs");
		let late = next.enriched(&enrichment("https://site/a", "Ant", "late"));

		assert!(late.results.is_empty());
		assert_eq!(late.phase, SearchPhase::Searching);
	}

	#[test]
	fn phase_tracks_enrichment_progress() {
		let state = ResultsState::default().searching("cats");
		let published = state.published(state.generation, sample()).expect("publish failed");

		assert_eq!(published.phase, SearchPhase::Partial);
		assert!(!published.loading);

		let state = published
			.enriched(&enrichment("https://site/a", "Ant", ""))
			.enriched(&enrichment("https://site/b", "Bee", ""));

		assert_eq!(state.phase, SearchPhase::Complete);
	}

	#[test]
	fn failure_clears_results() {
		let state = ResultsState::default().searching("cats");
		let state = state.published(state.generation, sample()).expect("publish failed");
		let retry = state.searching("cats");
		let failed = retry.failed(retry.generation, "Error fetching results").expect("fail failed");

		assert_eq!(failed.phase, SearchPhase::Error);
		assert!(failed.results.is_empty());
		assert!(!failed.loading);
		assert_eq!(failed.error.as_deref(), Some("Error fetching results"));
	}
}
