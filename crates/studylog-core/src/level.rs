//! Level — the legacy gamification record.
//!
//! Kept for compatibility with the early `/levels` API surface. A level has a
//! name, an experience counter, and any number of free-form metadata keys
//! which are stored and returned verbatim. Nothing else references levels.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Record, RecordId, Result};

/// Keys owned by the record itself; never accepted as metadata.
const RESERVED_KEYS: &[&str] = &["id", "nazwa", "xp"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
  pub id:       RecordId,
  #[serde(rename = "nazwa")]
  pub name:     String,
  #[serde(default)]
  pub xp:       u64,
  #[serde(flatten)]
  pub metadata: Map<String, Value>,
}

impl Level {
  pub fn new(input: NewLevel) -> Self {
    Self {
      id:       RecordId::generate(),
      name:     input.name,
      xp:       input.xp,
      metadata: input.metadata,
    }
  }

  /// Apply a validated partial update.
  ///
  /// Metadata keys are merged; a `null` value removes the key.
  pub fn apply(&mut self, patch: LevelPatch) {
    if let Some(name) = patch.name {
      self.name = name;
    }
    if let Some(xp) = patch.xp {
      self.xp = xp;
    }
    for (key, value) in patch.metadata {
      if value.is_null() {
        self.metadata.remove(&key);
      } else {
        self.metadata.insert(key, value);
      }
    }
  }
}

impl Record for Level {
  fn id(&self) -> &RecordId { &self.id }
}

// ─── Payloads ────────────────────────────────────────────────────────────────

/// A validated request to create a level.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLevel {
  pub name:     String,
  pub xp:       u64,
  pub metadata: Map<String, Value>,
}

impl NewLevel {
  pub fn parse(
    name: Option<&str>,
    xp: Option<&Value>,
    metadata: Map<String, Value>,
  ) -> Result<Self> {
    let name = name
      .and_then(non_empty)
      .ok_or_else(|| Error::missing_field("nazwa"))?;
    Ok(Self {
      name,
      xp: xp.map(parse_xp).transpose()?.unwrap_or_default(),
      metadata: without_reserved(metadata),
    })
  }
}

/// A validated partial update for `PUT /levels/{id}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelPatch {
  pub name:     Option<String>,
  pub xp:       Option<u64>,
  pub metadata: Map<String, Value>,
}

impl LevelPatch {
  pub fn parse(
    name: Option<&str>,
    xp: Option<&Value>,
    metadata: Map<String, Value>,
  ) -> Result<Self> {
    let name = name
      .map(|n| {
        non_empty(n)
          .ok_or_else(|| Error::Validation("`nazwa` must not be empty".into()))
      })
      .transpose()?;
    Ok(Self {
      name,
      xp: xp.map(parse_xp).transpose()?,
      metadata: without_reserved(metadata),
    })
  }
}

fn non_empty(name: &str) -> Option<String> {
  let name = name.trim();
  (!name.is_empty()).then(|| name.to_owned())
}

fn parse_xp(value: &Value) -> Result<u64> {
  value.as_u64().ok_or_else(|| {
    Error::Validation("`xp` must be a non-negative integer".into())
  })
}

fn without_reserved(mut metadata: Map<String, Value>) -> Map<String, Value> {
  metadata.retain(|k, _| !RESERVED_KEYS.contains(&k.as_str()));
  metadata
}
