use std::{collections::HashMap, sync::Mutex};

use crate::{KeyValueStore, Result};

#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: Mutex<HashMap<String, String>>,
}
impl MemoryStore {
	pub fn with_entry(key: &str, value: &str) -> Self {
		Self { entries: Mutex::new(HashMap::from([(key.to_string(), value.to_string())])) }
	}
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<String>> {
		let entries = self.entries.lock().unwrap_or_else(|err| err.into_inner());

		Ok(entries.get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<()> {
		let mut entries = self.entries.lock().unwrap_or_else(|err| err.into_inner());

		entries.insert(key.to_string(), value.to_string());

		Ok(())
	}
}
