//! Sidebar presentation state. Never persisted and independent of the history data.

use std::collections::HashMap;

use crate::{history::History, id::NodeId, session::Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
	pub open: bool,
	/// Explicit expansion flags; an absent entry means expanded.
	expanded: HashMap<NodeId, bool>,
}
impl Sidebar {
	pub fn is_expanded(&self, id: &NodeId) -> bool {
		self.expanded.get(id).copied().unwrap_or(true)
	}

	pub fn toggle_sidebar(&self) -> Self {
		Self { open: !self.open, expanded: self.expanded.clone() }
	}

	pub fn toggle_node(&self, id: &NodeId) -> Self {
		let mut expanded = self.expanded.clone();

		expanded.insert(id.clone(), !self.is_expanded(id));

		Self { open: self.open, expanded }
	}

	/// Drops flags of nodes no longer present in `history`.
	pub fn pruned(&self, history: &History) -> Self {
		Self {
			open: self.open,
			expanded: self
				.expanded
				.iter()
				.filter(|(id, _)| history.contains(id))
				.map(|(id, flag)| (id.clone(), *flag))
				.collect(),
		}
	}
}

impl Default for Sidebar {
	fn default() -> Self {
		Self { open: true, expanded: HashMap::new() }
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeRow {
	Query {
		id: NodeId,
		label: String,
		active: bool,
		expanded: bool,
		has_children: bool,
	},
	Article {
		id: NodeId,
		parent_id: NodeId,
		title: String,
		url: String,
	},
}

/// Rows a view renders for the history tree, top to bottom.
pub fn tree_rows(session: &Session, sidebar: &Sidebar) -> Vec<TreeRow> {
	if !sidebar.open {
		return Vec::new();
	}

	let mut rows = Vec::new();

	for node in session.history.nodes() {
		let expanded = sidebar.is_expanded(&node.id);

		rows.push(TreeRow::Query {
			id: node.id.clone(),
			label: node.query_text.clone(),
			active: session.active_query_id.as_ref() == Some(&node.id),
			expanded,
			has_children: !node.articles.is_empty(),
		});

		if !expanded {
			continue;
		}

		rows.extend(node.articles.iter().map(|article| TreeRow::Article {
			id: article.id.clone(),
			parent_id: node.id.clone(),
			title: article.title.clone(),
			url: article.url.clone(),
		}));
	}

	rows
}
