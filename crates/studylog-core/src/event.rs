//! Calendar events and date-range filtering.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Error, Record, RecordId, Result, iso};

const DATE_FORMAT_HINT: &str =
  "invalid date format, expected ISO-8601 (e.g. 2025-12-01T15:00:00)";

// ─── Event ───────────────────────────────────────────────────────────────────

/// A calendar entry.
///
/// The timestamp is validated on creation and then stored verbatim; records
/// edited on disk may hold timestamps that no longer parse, or that are not
/// strings at all. Those decode as their JSON text (empty when missing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub id:        RecordId,
  #[serde(rename = "nazwa")]
  pub name:      String,
  #[serde(rename = "data", default, deserialize_with = "timestamp_text")]
  pub timestamp: String,
  #[serde(rename = "lokalizacja", default)]
  pub location:  String,
}

impl Event {
  pub fn new(input: NewEvent) -> Self {
    Self {
      id:        RecordId::generate(),
      name:      input.name,
      timestamp: input.timestamp,
      location:  input.location,
    }
  }

  /// The stored timestamp, if it still parses as ISO-8601.
  pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
    iso::parse(&self.timestamp)
  }
}

impl Record for Event {
  fn id(&self) -> &RecordId { &self.id }
}

fn timestamp_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
  Ok(match Value::deserialize(d)? {
    Value::String(s) => s,
    Value::Null => String::new(),
    other => other.to_string(),
  })
}

// ─── Creation payload ────────────────────────────────────────────────────────

/// A validated request to create an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
  pub name:      String,
  pub timestamp: String,
  pub location:  String,
}

impl NewEvent {
  pub fn parse(
    name: Option<&str>,
    timestamp: Option<&str>,
    location: Option<&str>,
  ) -> Result<Self> {
    let name = required(name, "nazwa")?;
    let timestamp = required(timestamp, "data")?;
    if iso::parse(timestamp).is_none() {
      return Err(Error::Validation(DATE_FORMAT_HINT.to_owned()));
    }

    Ok(Self {
      name:      name.to_owned(),
      timestamp: timestamp.to_owned(),
      location:  location.map(str::trim).unwrap_or_default().to_owned(),
    })
  }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
  value
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .ok_or_else(|| Error::missing_field(field))
}

// ─── Range filter ────────────────────────────────────────────────────────────

/// Inclusive `[from, to]` window over event timestamps. Either bound may be
/// open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventRange {
  pub from: Option<NaiveDateTime>,
  pub to:   Option<NaiveDateTime>,
}

impl EventRange {
  /// Build a range from raw query values. A bound that does not parse is
  /// dropped rather than rejected.
  pub fn from_query(from: Option<&str>, to: Option<&str>) -> Self {
    Self {
      from: from.and_then(iso::parse),
      to:   to.and_then(iso::parse),
    }
  }

  pub fn is_unbounded(&self) -> bool { self.from.is_none() && self.to.is_none() }

  /// Whether `event` falls inside the window.
  ///
  /// Events whose stored timestamp no longer parses are always included.
  pub fn contains(&self, event: &Event) -> bool {
    if self.is_unbounded() {
      return true;
    }
    let Some(ts) = event.parsed_timestamp() else {
      return true;
    };
    self.from.is_none_or(|from| ts >= from) && self.to.is_none_or(|to| ts <= to)
  }
}
