use std::{
	fs, io,
	path::PathBuf,
	sync::Mutex,
};

use serde_json::{Map, Value};

use crate::{Error, KeyValueStore, Result};

/// Keeps every key in one JSON object on disk, rewritten atomically on each `set`.
#[derive(Debug)]
pub struct FileStore {
	path: PathBuf,
	write_lock: Mutex<()>,
}
impl FileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into(), write_lock: Mutex::new(()) }
	}

	fn read_entries(&self) -> Result<Map<String, Value>> {
		let raw = match fs::read_to_string(&self.path) {
			Ok(raw) => raw,
			Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
			Err(err) => return Err(Error::Io { path: self.path.clone(), source: err }),
		};

		if raw.trim().is_empty() {
			return Ok(Map::new());
		}

		match serde_json::from_str(&raw)? {
			Value::Object(entries) => Ok(entries),
			_ => Err(Error::Corrupt {
				message: format!("{} does not hold a JSON object.", self.path.display()),
			}),
		}
	}

	fn write_entries(&self, entries: &Map<String, Value>) -> Result<()> {
		let io_err = |source: io::Error| Error::Io { path: self.path.clone(), source };

		if let Some(parent) = self.path.parent()
			&& !parent.as_os_str().is_empty()
		{
			fs::create_dir_all(parent).map_err(io_err)?;
		}

		let tmp = self.path.with_extension("tmp");

		fs::write(&tmp, serde_json::to_vec_pretty(entries)?).map_err(io_err)?;
		fs::rename(&tmp, &self.path).map_err(io_err)?;

		Ok(())
	}
}

impl KeyValueStore for FileStore {
	fn get(&self, key: &str) -> Result<Option<String>> {
		let entries = self.read_entries()?;

		Ok(entries.get(key).map(|value| match value {
			Value::String(text) => text.clone(),
			other => other.to_string(),
		}))
	}

	fn set(&self, key: &str, value: &str) -> Result<()> {
		let _guard = self.write_lock.lock().unwrap_or_else(|err| err.into_inner());
		let mut entries = match self.read_entries() {
			Ok(entries) => entries,
			Err(err @ Error::Io { .. }) => return Err(err),
			Err(err) => {
				tracing::warn!(path = ?self.path, error = %err, "Replacing unreadable store file.");

				Map::new()
			},
		};

		entries.insert(key.to_string(), Value::String(value.to_string()));

		self.write_entries(&entries)
	}
}
