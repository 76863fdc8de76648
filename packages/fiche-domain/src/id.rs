use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Opaque identity of a query node or article reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);
impl NodeId {
	pub fn generate() -> Self {
		Self(Uuid::new_v4().to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for NodeId {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl From<String> for NodeId {
	fn from(value: String) -> Self {
		Self(value)
	}
}

// Histories written by older clients carry millisecond timestamps as numeric ids.
impl<'de> Deserialize<'de> for NodeId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum RawId {
			Text(String),
			Unsigned(u64),
			Float(f64),
		}

		match RawId::deserialize(deserializer)? {
			RawId::Text(text) => Ok(Self(text)),
			RawId::Unsigned(number) => Ok(Self(number.to_string())),
			RawId::Float(number) if number.is_finite() && number.fract() == 0.0 =>
				Ok(Self(format!("{number:.0}"))),
			RawId::Float(number) => Ok(Self(number.to_string())),
		}
	}
}
