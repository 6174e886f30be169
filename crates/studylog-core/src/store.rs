//! The `StudyStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `studylog-store-json`).
//! The API layer depends on this abstraction, not on any concrete backend.
//!
//! Absence is reported as `None` / `false` rather than as an error, so callers
//! decide how to surface it. Inputs are expected to come from the `parse`
//! constructors of `New*` and [`LevelPatch`], so backends only fail on
//! storage problems.

use std::future::Future;

use crate::{
  RecordId,
  event::{Event, EventRange, NewEvent},
  level::{Level, LevelPatch, NewLevel},
  subject::{NewSubject, Subject},
};

/// Abstraction over a studylog storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait StudyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Subjects ──────────────────────────────────────────────────────────

  /// All subjects, in storage order.
  fn list_subjects(
    &self,
  ) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;

  /// Create and persist a new subject.
  fn add_subject(
    &self,
    input: NewSubject,
  ) -> impl Future<Output = Result<Subject, Self::Error>> + Send + '_;

  fn get_subject(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Option<Subject>, Self::Error>> + Send + '_;

  /// Record a finished study session and persist the updated subject.
  /// Returns `None` if the subject does not exist.
  fn complete_session(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Option<Subject>, Self::Error>> + Send + '_;

  /// Remove a subject. Returns `false` if it did not exist.
  fn delete_subject(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Events ────────────────────────────────────────────────────────────

  /// Events inside `range`, in storage order.
  fn list_events<'a>(
    &'a self,
    range: &'a EventRange,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + 'a;

  fn add_event(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  fn get_event(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Option<Event>, Self::Error>> + Send + '_;

  /// Remove an event. Returns `false` if it did not exist.
  fn delete_event(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Levels (legacy) ───────────────────────────────────────────────────

  fn list_levels(
    &self,
  ) -> impl Future<Output = Result<Vec<Level>, Self::Error>> + Send + '_;

  fn add_level(
    &self,
    input: NewLevel,
  ) -> impl Future<Output = Result<Level, Self::Error>> + Send + '_;

  fn get_level(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Option<Level>, Self::Error>> + Send + '_;

  /// Apply `patch` to a level and persist it. Returns `None` if the level
  /// does not exist.
  fn update_level(
    &self,
    id: RecordId,
    patch: LevelPatch,
  ) -> impl Future<Output = Result<Option<Level>, Self::Error>> + Send + '_;

  /// Remove a level. Returns `false` if it did not exist.
  fn delete_level(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
