//! The two-level tree of past queries and the articles opened under them.
//!
//! Every mutation returns a new `History`; nodes are never edited in place.

use serde::{Deserialize, Serialize};

use crate::{id::NodeId, results::SearchResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
	pub id: NodeId,
	pub title: String,
	pub url: String,
}
impl ArticleRef {
	pub fn from_result(result: &SearchResult) -> Self {
		Self { id: NodeId::generate(), title: result.title.clone(), url: result.url.clone() }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryNode {
	pub id: NodeId,
	#[serde(rename = "query")]
	pub query_text: String,
	#[serde(default)]
	pub articles: Vec<ArticleRef>,
}
impl QueryNode {
	pub fn new(query_text: impl Into<String>) -> Self {
		Self { id: NodeId::generate(), query_text: query_text.into(), articles: Vec::new() }
	}

	pub fn has_url(&self, url: &str) -> bool {
		self.articles.iter().any(|article| article.url == url)
	}
}

/// Query nodes, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
	nodes: Vec<QueryNode>,
}
impl History {
	pub fn new(nodes: Vec<QueryNode>) -> Self {
		Self { nodes }
	}

	pub fn nodes(&self) -> &[QueryNode] {
		&self.nodes
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn get(&self, id: &NodeId) -> Option<&QueryNode> {
		self.nodes.iter().find(|node| &node.id == id)
	}

	pub fn contains(&self, id: &NodeId) -> bool {
		self.get(id).is_some()
	}

	/// Prepends `node`.
	pub fn with_query(&self, node: QueryNode) -> Self {
		let mut nodes = Vec::with_capacity(self.nodes.len() + 1);

		nodes.push(node);
		nodes.extend(self.nodes.iter().cloned());

		Self { nodes }
	}

	/// Appends `article` under `query_id` unless that node already holds its url.
	///
	/// Returns an unchanged copy when `query_id` does not resolve.
	pub fn with_visit(&self, query_id: &NodeId, article: ArticleRef) -> Self {
		let nodes = self
			.nodes
			.iter()
			.map(|node| {
				if &node.id != query_id || node.has_url(&article.url) {
					return node.clone();
				}

				let mut articles = node.articles.clone();

				articles.push(article.clone());

				QueryNode { articles, ..node.clone() }
			})
			.collect();

		Self { nodes }
	}

	pub fn without_query(&self, id: &NodeId) -> Self {
		Self { nodes: self.nodes.iter().filter(|node| &node.id != id).cloned().collect() }
	}

	/// Removes `article_id` from `parent_id` only.
	pub fn without_article(&self, article_id: &NodeId, parent_id: &NodeId) -> Self {
		let nodes = self
			.nodes
			.iter()
			.map(|node| {
				if &node.id != parent_id {
					return node.clone();
				}

				QueryNode {
					articles: node
						.articles
						.iter()
						.filter(|article| &article.id != article_id)
						.cloned()
						.collect(),
					..node.clone()
				}
			})
			.collect();

		Self { nodes }
	}

	/// Loads a serialized history, treating absent or malformed input as empty.
	pub fn restore(raw: Option<&str>) -> Self {
		raw.and_then(|raw| Self::try_restore(raw).ok()).unwrap_or_default()
	}

	pub fn try_restore(raw: &str) -> serde_json::Result<Self> {
		serde_json::from_str(raw)
	}

	pub fn snapshot(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}
