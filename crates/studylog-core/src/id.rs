//! Record identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned to every stored record at creation time.
///
/// New ids are v4 UUIDs, but ids read back from disk are treated as opaque
/// strings and compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
  /// Mint a fresh, unique id.
  pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl From<String> for RecordId {
  fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for RecordId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Anything kept in a record collection: addressable by its [`RecordId`].
pub trait Record {
  fn id(&self) -> &RecordId;
}
