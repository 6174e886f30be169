//! Subject — a study topic and its focus-duration progression.
//!
//! A subject's focus duration starts at [`BASE_FOCUS_MINUTES`] and grows by
//! [`FOCUS_STEP_MINUTES`] every [`SESSIONS_PER_LEVEL`] completed sessions.
//! The level is never stored authoritatively; it is derived from the focus
//! duration on every read.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Record, RecordId, Result};

pub const BASE_FOCUS_MINUTES: u32 = 25;
pub const FOCUS_STEP_MINUTES: u32 = 5;
pub const SESSIONS_PER_LEVEL: u32 = 3;

fn default_focus() -> u32 { BASE_FOCUS_MINUTES }

// ─── Subject ─────────────────────────────────────────────────────────────────

/// A tracked study subject.
///
/// Serialises with the derived `level` alongside the stored fields; a `level`
/// key present on input is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SubjectRecord")]
pub struct Subject {
  pub id:                     RecordId,
  #[serde(rename = "nazwa")]
  pub name:                   String,
  #[serde(rename = "czas_skupienia", default = "default_focus")]
  pub focus_duration_minutes: u32,
  /// Sessions completed since the last level-up.
  #[serde(default)]
  pub sessions_completed:     u32,
}

impl Subject {
  /// Build a fresh subject from a validated payload, minting a new id.
  pub fn new(input: NewSubject) -> Self {
    Self {
      id:                     RecordId::generate(),
      name:                   input.name,
      focus_duration_minutes: input.focus_duration_minutes,
      sessions_completed:     0,
    }
  }

  /// Number of 5-minute steps earned above the 25-minute baseline.
  pub fn level(&self) -> u32 {
    self.focus_duration_minutes.saturating_sub(BASE_FOCUS_MINUTES)
      / FOCUS_STEP_MINUTES
  }

  /// Record one finished study session.
  ///
  /// Reaching the threshold levels the subject up once and resets the
  /// counter; a counter already past the threshold (hand-edited data) is
  /// treated the same way.
  pub fn complete_session(&mut self) {
    self.sessions_completed = self.sessions_completed.saturating_add(1);
    if self.sessions_completed >= SESSIONS_PER_LEVEL {
      self.focus_duration_minutes = self
        .focus_duration_minutes
        .saturating_add(FOCUS_STEP_MINUTES);
      self.sessions_completed = 0;
    }
  }
}

impl Record for Subject {
  fn id(&self) -> &RecordId { &self.id }
}

/// Wire shape of a [`Subject`], carrying the derived level.
#[derive(Serialize)]
struct SubjectRecord {
  id:                 RecordId,
  nazwa:              String,
  level:              u32,
  czas_skupienia:     u32,
  sessions_completed: u32,
}

impl From<Subject> for SubjectRecord {
  fn from(s: Subject) -> Self {
    Self {
      level:              s.level(),
      id:                 s.id,
      nazwa:              s.name,
      czas_skupienia:     s.focus_duration_minutes,
      sessions_completed: s.sessions_completed,
    }
  }
}

// ─── Creation payload ────────────────────────────────────────────────────────

/// A validated request to create a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
  pub name:                   String,
  pub focus_duration_minutes: u32,
}

impl NewSubject {
  /// Validate raw creation input.
  ///
  /// `name` must be non-empty after trimming. `focus` falls back to the
  /// baseline when absent, not an integer, or below one minute.
  pub fn parse(name: Option<&str>, focus: Option<&Value>) -> Result<Self> {
    let name = name
      .map(str::trim)
      .filter(|n| !n.is_empty())
      .ok_or_else(|| Error::missing_field("nazwa"))?;

    Ok(Self {
      name:                   name.to_owned(),
      focus_duration_minutes: focus
        .and_then(focus_minutes)
        .unwrap_or(BASE_FOCUS_MINUTES),
    })
  }
}

/// Accepts a JSON integer or a string holding one; anything else is `None`.
fn focus_minutes(value: &Value) -> Option<u32> {
  let minutes = match value {
    Value::Number(n) => n.as_i64(),
    Value::String(s) => s.trim().parse::<i64>().ok(),
    _ => None,
  }?;
  u32::try_from(minutes).ok().filter(|m| *m >= 1)
}
