//! [`JsonStore`] — the flat-file implementation of [`StudyStore`].

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use studylog_core::{
  Record, RecordId,
  event::{Event, EventRange, NewEvent},
  level::{Level, LevelPatch, NewLevel},
  store::StudyStore,
  subject::{NewSubject, Subject},
};

use crate::{
  Error, Result,
  collection::{ensure_initialized, load, load_raw, save},
};

// ─── Collections ─────────────────────────────────────────────────────────────

/// One record collection and the file that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
  Levels,
  Events,
  Subjects,
}

impl Collection {
  pub const ALL: [Collection; 3] = [Self::Levels, Self::Events, Self::Subjects];

  pub fn file_name(self) -> &'static str {
    match self {
      Self::Levels => "levels.json",
      Self::Events => "events.json",
      Self::Subjects => "subjects.json",
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A studylog store kept as one JSON file per collection inside a data
/// directory.
///
/// Holds no state beyond the directory path: each call loads the file fresh.
/// Concurrent writers are not coordinated, so the last save wins.
#[derive(Debug, Clone)]
pub struct JsonStore {
  dir: PathBuf,
}

impl JsonStore {
  /// Open a store rooted at `dir`, creating the directory and any missing
  /// collection files.
  pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
    let store = Self { dir: dir.into() };
    ensure_initialized(Collection::ALL.map(|c| store.path(c))).await?;
    Ok(store)
  }

  pub fn data_dir(&self) -> &Path { &self.dir }

  /// Path of the file backing `collection`.
  pub fn path(&self, collection: Collection) -> PathBuf {
    self.dir.join(collection.file_name())
  }

  async fn all<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
    load(&self.path(collection)).await
  }

  async fn find<T>(&self, collection: Collection, id: &RecordId) -> Option<T>
  where
    T: DeserializeOwned + Record,
  {
    self
      .all::<T>(collection)
      .await
      .into_iter()
      .find(|r| r.id() == id)
  }

  async fn insert<T>(&self, collection: Collection, record: T) -> Result<T>
  where
    T: Serialize,
  {
    let path = self.path(collection);
    let mut values = load_raw(&path).await;
    values.push(serde_json::to_value(&record)?);
    save(&path, &values).await?;
    Ok(record)
  }

  /// Mutate the record with `id` in place and persist the collection. The
  /// file is left untouched when no such record exists.
  async fn modify<T, F>(
    &self,
    collection: Collection,
    id: &RecordId,
    f: F,
  ) -> Result<Option<T>>
  where
    T: DeserializeOwned + Serialize + Record,
    F: FnOnce(&mut T),
  {
    let path = self.path(collection);
    let mut values = load_raw(&path).await;
    let Some((pos, mut record)) = locate::<T>(&values, id) else {
      return Ok(None);
    };
    f(&mut record);
    values[pos] = serde_json::to_value(&record)?;
    save(&path, &values).await?;
    Ok(Some(record))
  }

  /// Remove the record with `id` and persist the collection. Returns `false`
  /// (without rewriting the file) when no such record exists.
  async fn remove<T>(&self, collection: Collection, id: &RecordId) -> Result<bool>
  where
    T: DeserializeOwned + Record,
  {
    let path = self.path(collection);
    let mut values = load_raw(&path).await;
    let Some((pos, _)) = locate::<T>(&values, id) else {
      return Ok(false);
    };
    values.remove(pos);
    save(&path, &values).await?;
    Ok(true)
  }
}

/// Position and decoded form of the first element that decodes as `T` and
/// carries `id`. Elements that do not decode are never matched.
fn locate<T>(values: &[Value], id: &RecordId) -> Option<(usize, T)>
where
  T: DeserializeOwned + Record,
{
  values.iter().enumerate().find_map(|(pos, value)| {
    T::deserialize(value)
      .ok()
      .filter(|record| record.id() == id)
      .map(|record| (pos, record))
  })
}

// ─── StudyStore impl ─────────────────────────────────────────────────────────

impl StudyStore for JsonStore {
  type Error = Error;

  // ── Subjects ──────────────────────────────────────────────────────────────

  async fn list_subjects(&self) -> Result<Vec<Subject>> {
    Ok(self.all(Collection::Subjects).await)
  }

  async fn add_subject(&self, input: NewSubject) -> Result<Subject> {
    let subject = self.insert(Collection::Subjects, Subject::new(input)).await?;
    tracing::info!(id = %subject.id, name = %subject.name, "subject created");
    Ok(subject)
  }

  async fn get_subject(&self, id: RecordId) -> Result<Option<Subject>> {
    Ok(self.find(Collection::Subjects, &id).await)
  }

  async fn complete_session(&self, id: RecordId) -> Result<Option<Subject>> {
    let subject = self
      .modify(Collection::Subjects, &id, Subject::complete_session)
      .await?;
    if let Some(s) = &subject {
      tracing::info!(
        id = %s.id,
        sessions_completed = s.sessions_completed,
        focus_duration_minutes = s.focus_duration_minutes,
        "session completed"
      );
    }
    Ok(subject)
  }

  async fn delete_subject(&self, id: RecordId) -> Result<bool> {
    self.remove::<Subject>(Collection::Subjects, &id).await
  }

  // ── Events ────────────────────────────────────────────────────────────────

  async fn list_events(&self, range: &EventRange) -> Result<Vec<Event>> {
    let mut events: Vec<Event> = self.all(Collection::Events).await;
    events.retain(|e| range.contains(e));
    Ok(events)
  }

  async fn add_event(&self, input: NewEvent) -> Result<Event> {
    self.insert(Collection::Events, Event::new(input)).await
  }

  async fn get_event(&self, id: RecordId) -> Result<Option<Event>> {
    Ok(self.find(Collection::Events, &id).await)
  }

  async fn delete_event(&self, id: RecordId) -> Result<bool> {
    self.remove::<Event>(Collection::Events, &id).await
  }

  // ── Levels ────────────────────────────────────────────────────────────────

  async fn list_levels(&self) -> Result<Vec<Level>> {
    Ok(self.all(Collection::Levels).await)
  }

  async fn add_level(&self, input: NewLevel) -> Result<Level> {
    self.insert(Collection::Levels, Level::new(input)).await
  }

  async fn get_level(&self, id: RecordId) -> Result<Option<Level>> {
    Ok(self.find(Collection::Levels, &id).await)
  }

  async fn update_level(
    &self,
    id: RecordId,
    patch: LevelPatch,
  ) -> Result<Option<Level>> {
    self
      .modify(Collection::Levels, &id, |level: &mut Level| level.apply(patch))
      .await
  }

  async fn delete_level(&self, id: RecordId) -> Result<bool> {
    self.remove::<Level>(Collection::Levels, &id).await
  }
}
