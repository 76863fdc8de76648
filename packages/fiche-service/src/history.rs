use tokio::sync::watch;

use fiche_domain::{History, NodeId, QueryNode, SearchResult, Session};
use fiche_storage::HistoryStore;

use crate::Result;

/// Single writer for the session history.
///
/// Every operation reads the latest session, applies one pure transition and writes it back
/// under the same lock, so concurrent callers never lose each other's updates. History changes
/// are persisted under that lock too, in write order.
///
/// Persistence is synchronous file I/O on the calling thread. While a save runs, `session()`
/// readers and other writers block on the lock, so the backing store should stay small.
pub struct SessionHistoryStore {
	state: watch::Sender<Session>,
	persistence: Option<HistoryStore>,
}
impl SessionHistoryStore {
	/// Restores the persisted history; unreadable state starts empty.
	pub fn new(persistence: HistoryStore) -> Self {
		let history = persistence.load();

		tracing::info!(queries = history.len(), "Restored search history.");

		Self { state: watch::Sender::new(Session::new(history)), persistence: Some(persistence) }
	}

	pub fn in_memory() -> Self {
		Self { state: watch::Sender::new(Session::default()), persistence: None }
	}

	pub fn session(&self) -> Session {
		self.state.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<Session> {
		self.state.subscribe()
	}

	pub fn record_query(&self, text: &str) -> QueryNode {
		let node = QueryNode::new(text);

		self.apply(|session| session.with_query_node(node.clone()));

		node
	}

	pub fn record_visit(&self, query_id: Option<&NodeId>, result: &SearchResult) {
		self.apply(|session| session.record_visit(query_id, result));
	}

	/// Attaches the visit to whichever query is active when the write happens.
	pub fn record_visit_to_active(&self, result: &SearchResult) {
		self.apply(|session| session.record_visit(session.active_query_id.as_ref(), result));
	}

	pub fn delete_query(&self, id: &NodeId) {
		self.apply(|session| session.delete_query(id));
	}

	pub fn delete_article(&self, article_id: &NodeId, parent_query_id: &NodeId) {
		self.apply(|session| session.delete_article(article_id, parent_query_id));
	}

	pub fn activate(&self, id: &NodeId) {
		self.apply(|session| session.activate(id));
	}

	pub fn snapshot(&self) -> Result<String> {
		Ok(self.state.borrow().history.snapshot()?)
	}

	/// Replaces the history with a snapshot; malformed input yields an empty history.
	pub fn restore(&self, raw: Option<&str>) {
		let history = History::restore(raw);

		self.apply(move |session| session.with_history(history));
	}

	/// Blocks for the duration of the save when the history changes.
	fn apply(&self, transition: impl FnOnce(&Session) -> Session) {
		self.state.send_if_modified(|current| {
			let next = transition(current);

			if next == *current {
				return false;
			}
			if next.history != current.history
				&& let Some(persistence) = &self.persistence
				&& let Err(err) = persistence.save(&next.history)
			{
				tracing::warn!(error = %err, "Failed to persist search history.");
			}

			*current = next;

			true
		});
	}
}
