pub mod controller;
pub mod enrich;
pub mod history;
pub mod orchestrator;

mod error;

pub use controller::{Activation, HistoryItem, SessionController, UrlOpener};
pub use enrich::HttpEnricher;
pub use error::{Error, Result};
pub use fiche_providers::html::DocumentMetadata;
pub use history::SessionHistoryStore;
pub use orchestrator::{SEARCH_ERROR_MESSAGE, SearchOrchestrator};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use fiche_config::SearchProviderConfig;
use fiche_providers::search;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Turns query text into a raw provider payload.
pub trait SearchProvider
where
	Self: Send + Sync,
{
	fn search<'a>(&'a self, text: &'a str) -> BoxFuture<'a, fiche_providers::Result<Value>>;
}

/// Best-effort metadata for one URL. Never fails: errors resolve to empty metadata.
pub trait MetadataEnricher
where
	Self: Send + Sync,
{
	fn enrich<'a>(&'a self, url: &'a str) -> BoxFuture<'a, DocumentMetadata>;
}

#[derive(Clone)]
pub struct Providers {
	pub search: Arc<dyn SearchProvider>,
	pub enricher: Arc<dyn MetadataEnricher>,
}
impl Providers {
	pub fn new(search: Arc<dyn SearchProvider>, enricher: Arc<dyn MetadataEnricher>) -> Self {
		Self { search, enricher }
	}

	pub fn from_config(cfg: &fiche_config::Providers) -> Self {
		Self {
			search: Arc::new(HttpSearchProvider { cfg: cfg.search.clone() }),
			enricher: Arc::new(HttpEnricher::new(cfg.summary.clone(), cfg.document.clone())),
		}
	}
}

struct HttpSearchProvider {
	cfg: SearchProviderConfig,
}

impl SearchProvider for HttpSearchProvider {
	fn search<'a>(&'a self, text: &'a str) -> BoxFuture<'a, fiche_providers::Result<Value>> {
		Box::pin(search::search(&self.cfg, text))
	}
}
