use crate::{
	history::{ArticleRef, History, QueryNode},
	id::NodeId,
	results::SearchResult,
};

/// History plus the weak reference to the node new visits attach to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
	pub history: History,
	pub active_query_id: Option<NodeId>,
}
impl Session {
	pub fn new(history: History) -> Self {
		Self { history, active_query_id: None }
	}

	pub fn active_query(&self) -> Option<&QueryNode> {
		self.active_query_id.as_ref().and_then(|id| self.history.get(id))
	}

	/// Prepends a fresh node and makes it active.
	pub fn record_query(&self, text: &str) -> (Self, QueryNode) {
		let node = QueryNode::new(text);

		(self.with_query_node(node.clone()), node)
	}

	pub fn with_query_node(&self, node: QueryNode) -> Self {
		let active_query_id = Some(node.id.clone());

		Self { history: self.history.with_query(node), active_query_id }
	}

	/// Replaces the whole history; the active reference survives only if it still resolves.
	pub fn with_history(&self, history: History) -> Self {
		let active_query_id = self.active_query_id.clone().filter(|id| history.contains(id));

		Self { history, active_query_id }
	}

	pub fn record_visit(&self, active_query_id: Option<&NodeId>, result: &SearchResult) -> Self {
		let Some(query_id) = active_query_id.filter(|id| self.history.contains(id)) else {
			return self.clone();
		};

		Self {
			history: self.history.with_visit(query_id, ArticleRef::from_result(result)),
			active_query_id: self.active_query_id.clone(),
		}
	}

	pub fn delete_query(&self, id: &NodeId) -> Self {
		let active_query_id = self.active_query_id.clone().filter(|active| active != id);

		Self { history: self.history.without_query(id), active_query_id }
	}

	pub fn delete_article(&self, article_id: &NodeId, parent_query_id: &NodeId) -> Self {
		Self {
			history: self.history.without_article(article_id, parent_query_id),
			active_query_id: self.active_query_id.clone(),
		}
	}

	/// Ignored when `id` does not resolve, so the active reference never dangles.
	pub fn activate(&self, id: &NodeId) -> Self {
		if !self.history.contains(id) {
			return self.clone();
		}

		Self { history: self.history.clone(), active_query_id: Some(id.clone()) }
	}
}
