use std::sync::Arc;

use fiche_domain::History;

use crate::{KeyValueStore, Result};

/// Loads and saves the whole history under one key.
#[derive(Clone)]
pub struct HistoryStore {
	kv: Arc<dyn KeyValueStore>,
	key: String,
}
impl HistoryStore {
	pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
		Self { kv, key: key.into() }
	}

	/// Absent or malformed state loads as an empty history.
	pub fn load(&self) -> History {
		let raw = match self.kv.get(&self.key) {
			Ok(raw) => raw,
			Err(err) => {
				tracing::warn!(key = %self.key, error = %err, "Failed to read persisted history.");

				return History::default();
			},
		};
		let Some(raw) = raw else {
			return History::default();
		};

		match History::try_restore(&raw) {
			Ok(history) => history,
			Err(err) => {
				tracing::warn!(key = %self.key, error = %err, "Discarding malformed persisted history.");

				History::default()
			},
		}
	}

	pub fn save(&self, history: &History) -> Result<()> {
		let raw = history.snapshot()?;

		self.kv.set(&self.key, &raw)
	}
}
