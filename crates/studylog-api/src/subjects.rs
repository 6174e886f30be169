//! Handlers for `/subjects` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/subjects` | All subjects in storage order |
//! | `POST`   | `/subjects` | Body: `{"nazwa":"...","czas_skupienia":30}`; returns 201 |
//! | `GET`    | `/subjects/:id` | 404 if not found |
//! | `DELETE` | `/subjects/:id` | 204, or 404 if not found |
//! | `POST`   | `/subjects/:id/session_complete` | Returns the updated subject |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;
use studylog_core::{
  RecordId,
  store::StudyStore,
  subject::{NewSubject, Subject},
};

use crate::{error::ApiError, json::PrettyJson};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /subjects`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<PrettyJson<Vec<Subject>>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let subjects = store.list_subjects().await.map_err(ApiError::store)?;
  Ok(PrettyJson(subjects))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /subjects`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub nazwa:          Option<String>,
  /// Minutes; anything unusable falls back to the 25-minute baseline.
  pub czas_skupienia: Option<Value>,
}

/// `POST /subjects` — returns 201 + the stored [`Subject`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(body) = body?;
  let input = NewSubject::parse(body.nazwa.as_deref(), body.czas_skupienia.as_ref())?;
  let subject = store.add_subject(input).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, PrettyJson(subject)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /subjects/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<PrettyJson<Subject>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let subject = store
    .get_subject(RecordId::from(id.as_str()))
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(&id))?;
  Ok(PrettyJson(subject))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /subjects/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let removed = store
    .delete_subject(RecordId::from(id.as_str()))
    .await
    .map_err(ApiError::store)?;
  if !removed {
    return Err(not_found(&id));
  }
  Ok(StatusCode::NO_CONTENT)
}

// ─── Session complete ─────────────────────────────────────────────────────────

/// `POST /subjects/:id/session_complete` — advances the session counter and
/// returns the updated subject.
pub async fn session_complete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<PrettyJson<Subject>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let subject = store
    .complete_session(RecordId::from(id.as_str()))
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(&id))?;
  Ok(PrettyJson(subject))
}

fn not_found(id: &str) -> ApiError {
  ApiError::NotFound(format!("subject {id} not found"))
}
