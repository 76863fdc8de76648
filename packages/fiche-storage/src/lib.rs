pub mod file;
pub mod history;
pub mod memory;

mod error;

pub use error::Error;
pub use file::FileStore;
pub use history::HistoryStore;
pub use memory::MemoryStore;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A flat string-to-string store.
pub trait KeyValueStore
where
	Self: Send + Sync,
{
	fn get(&self, key: &str) -> Result<Option<String>>;

	fn set(&self, key: &str, value: &str) -> Result<()>;
}
