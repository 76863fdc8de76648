//! Runs a search, publishes normalized hits and folds per-result metadata in as it arrives.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use fiche_domain::{
	Enrichment, NormalizeOptions, ResultsState, SearchPhase, SearchResult, normalize,
};

use crate::{Error, MetadataEnricher, Providers, Result, SearchProvider};

/// User-facing message stored on the results state when the primary search fails.
pub const SEARCH_ERROR_MESSAGE: &str = "Error fetching results";

pub struct SearchOrchestrator {
	provider: Arc<dyn SearchProvider>,
	enricher: Arc<dyn MetadataEnricher>,
	opts: NormalizeOptions,
	state: Arc<watch::Sender<ResultsState>>,
	completions: mpsc::UnboundedSender<Enrichment>,
}
impl SearchOrchestrator {
	/// Must be called from within a Tokio runtime; spawns the task that applies enrichments.
	pub fn new(providers: Providers, opts: NormalizeOptions) -> Self {
		let (state, _) = watch::channel(ResultsState::default());
		let state = Arc::new(state);
		let (completions, mut rx) = mpsc::unbounded_channel::<Enrichment>();
		let sink = state.clone();

		tokio::spawn(async move {
			while let Some(enrichment) = rx.recv().await {
				sink.send_modify(|current| *current = current.enriched(&enrichment));
			}
		});

		Self {
			provider: providers.search,
			enricher: providers.enricher,
			opts,
			state,
			completions,
		}
	}

	/// Publishes normalized hits and returns them before any enrichment lands.
	///
	/// Results of a superseded search are never published; the caller still receives them.
	pub async fn search(&self, text: &str) -> Result<Vec<SearchResult>> {
		let mut generation = 0;

		self.state.send_modify(|current| {
			*current = current.searching(text);
			generation = current.generation;
		});

		let results = match self.fetch(text).await {
			Ok(results) => results,
			Err(err) => {
				tracing::warn!(query = %text, error = %err, "Search failed.");

				self.state.send_if_modified(|current| {
					match current.failed(generation, SEARCH_ERROR_MESSAGE) {
						Some(next) => {
							*current = next;

							true
						},
						None => false,
					}
				});

				return Err(err);
			},
		};
		let published = self.state.send_if_modified(|current| {
			match current.published(generation, results.clone()) {
				Some(next) => {
					*current = next;

					true
				},
				None => false,
			}
		});

		if published {
			tracing::debug!(query = %text, hits = results.len(), "Published search results.");

			for result in &results {
				self.spawn_enrichment(result.url.clone());
			}
		} else {
			tracing::debug!(query = %text, generation, "Dropped results of a superseded search.");
		}

		Ok(results)
	}

	pub fn subscribe(&self) -> watch::Receiver<ResultsState> {
		self.state.subscribe()
	}

	pub fn snapshot(&self) -> ResultsState {
		self.state.borrow().clone()
	}

	/// Waits until the latest search has failed or every published result is enriched.
	pub async fn settled(&self) -> ResultsState {
		let mut rx = self.state.subscribe();
		let settled = rx
			.wait_for(|state| !matches!(state.phase, SearchPhase::Searching | SearchPhase::Partial))
			.await;

		match settled {
			Ok(state) => state.clone(),
			Err(_) => self.snapshot(),
		}
	}

	async fn fetch(&self, text: &str) -> Result<Vec<SearchResult>> {
		let payload = self
			.provider
			.search(text)
			.await
			.map_err(|err| Error::ProviderUnavailable { message: err.to_string() })?;

		normalize::normalize(&payload, &self.opts)
			.map_err(|err| Error::ProviderUnavailable { message: err.to_string() })
	}

	fn spawn_enrichment(&self, url: String) {
		let enricher = self.enricher.clone();
		let completions = self.completions.clone();

		tokio::spawn(async move {
			let metadata = enricher.enrich(&url).await;
			let _ = completions.send(Enrichment {
				url,
				title: metadata.title,
				description: metadata.description,
			});
		});
	}
}
