//! Wiring between user actions, the search orchestrator and the session history.

use std::sync::Arc;

use fiche_config::Config;
use fiche_domain::{
	NodeId, NormalizeOptions, ResultsState, SearchResult, Session, Sidebar, TreeRow, tree_rows,
};
use fiche_storage::{FileStore, HistoryStore};

use crate::{Error, Providers, Result, SearchOrchestrator, SessionHistoryStore};

/// Receives the "open URL" signal.
pub trait UrlOpener
where
	Self: Send + Sync,
{
	fn open(&self, url: &str);
}

/// A node of the history tree as addressed by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryItem {
	Query(NodeId),
	Article { id: NodeId, parent_id: NodeId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
	Opened(String),
	Replayed(Vec<SearchResult>),
	/// The item no longer exists in the history.
	Missing,
}

pub struct SessionController {
	orchestrator: SearchOrchestrator,
	history: SessionHistoryStore,
	opener: Arc<dyn UrlOpener>,
	sidebar: Sidebar,
	query: String,
}
impl SessionController {
	pub fn new(
		orchestrator: SearchOrchestrator,
		history: SessionHistoryStore,
		opener: Arc<dyn UrlOpener>,
	) -> Self {
		Self { orchestrator, history, opener, sidebar: Sidebar::default(), query: String::new() }
	}

	/// Builds HTTP providers and a file-backed history from `cfg`.
	pub fn from_config(cfg: &Config, opener: Arc<dyn UrlOpener>) -> Self {
		let providers = Providers::from_config(&cfg.providers);
		let opts =
			NormalizeOptions { article_url_base: cfg.providers.search.article_url_base.clone() };
		let store = HistoryStore::new(
			Arc::new(FileStore::new(cfg.storage.path.clone())),
			cfg.storage.key.clone(),
		);

		Self::new(
			SearchOrchestrator::new(providers, opts),
			SessionHistoryStore::new(store),
			opener,
		)
	}

	pub fn orchestrator(&self) -> &SearchOrchestrator {
		&self.orchestrator
	}

	pub fn history(&self) -> &SessionHistoryStore {
		&self.history
	}

	pub fn sidebar(&self) -> &Sidebar {
		&self.sidebar
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn results(&self) -> ResultsState {
		self.orchestrator.snapshot()
	}

	pub fn session(&self) -> Session {
		self.history.session()
	}

	pub fn rows(&self) -> Vec<TreeRow> {
		tree_rows(&self.history.session(), &self.sidebar)
	}

	/// Searches, then records the query as the new active node.
	///
	/// A failed search leaves the history untouched.
	pub async fn on_submit(&mut self, text: &str) -> Result<Vec<SearchResult>> {
		let text = text.trim();

		if text.is_empty() {
			return Err(Error::InvalidRequest { message: "Query text must not be empty.".into() });
		}

		self.query = text.to_string();

		let results = self.orchestrator.search(text).await?;
		let node = self.history.record_query(text);

		tracing::debug!(id = %node.id, query = %text, "Recorded query.");

		Ok(results)
	}

	pub fn on_result_activated(&self, result: &SearchResult) {
		self.history.record_visit_to_active(result);
		self.opener.open(&result.url);
	}

	/// Opens an article, or makes a query active and replays its search.
	pub async fn on_history_item_activated(&mut self, item: &HistoryItem) -> Result<Activation> {
		let session = self.history.session();

		match item {
			HistoryItem::Article { id, parent_id } => {
				let url = session
					.history
					.get(parent_id)
					.and_then(|node| node.articles.iter().find(|article| &article.id == id))
					.map(|article| article.url.clone());
				let Some(url) = url else {
					return Ok(Activation::Missing);
				};

				self.opener.open(&url);

				Ok(Activation::Opened(url))
			},
			HistoryItem::Query(id) => {
				let Some(node) = session.history.get(id) else {
					return Ok(Activation::Missing);
				};

				self.history.activate(id);
				self.query = node.query_text.clone();

				let results = self.orchestrator.search(&node.query_text).await?;

				Ok(Activation::Replayed(results))
			},
		}
	}

	pub fn on_delete(&mut self, item: &HistoryItem) {
		match item {
			HistoryItem::Query(id) => {
				self.history.delete_query(id);
				self.sidebar = self.sidebar.pruned(&self.history.session().history);
			},
			HistoryItem::Article { id, parent_id } => self.history.delete_article(id, parent_id),
		}
	}

	pub fn toggle_sidebar(&mut self) {
		self.sidebar = self.sidebar.toggle_sidebar();
	}

	pub fn toggle_node(&mut self, id: &NodeId) {
		self.sidebar = self.sidebar.toggle_node(id);
	}
}
