//! Handlers for the legacy `/levels` endpoints.
//!
//! Any body key other than `nazwa` and `xp` is stored as free-form metadata.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use studylog_core::{
  RecordId,
  level::{Level, LevelPatch, NewLevel},
  store::StudyStore,
};

use crate::{error::ApiError, json::PrettyJson};

/// JSON body accepted by `POST /levels` and `PUT /levels/:id`.
#[derive(Debug, Deserialize)]
pub struct LevelBody {
  pub nazwa:    Option<String>,
  pub xp:       Option<Value>,
  #[serde(flatten)]
  pub metadata: Map<String, Value>,
}

/// `GET /levels`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<PrettyJson<Vec<Level>>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let levels = store.list_levels().await.map_err(ApiError::store)?;
  Ok(PrettyJson(levels))
}

/// `POST /levels` — returns 201 + the stored [`Level`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<LevelBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(body) = body?;
  let input = NewLevel::parse(body.nazwa.as_deref(), body.xp.as_ref(), body.metadata)?;
  let level = store.add_level(input).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, PrettyJson(level)))
}

/// `GET /levels/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<PrettyJson<Level>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let level = store
    .get_level(RecordId::from(id.as_str()))
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(&id))?;
  Ok(PrettyJson(level))
}

/// `PUT /levels/:id` — partial update; `null` metadata values delete keys.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  body: Result<Json<LevelBody>, JsonRejection>,
) -> Result<PrettyJson<Level>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(body) = body?;
  let patch = LevelPatch::parse(body.nazwa.as_deref(), body.xp.as_ref(), body.metadata)?;
  let level = store
    .update_level(RecordId::from(id.as_str()), patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(&id))?;
  Ok(PrettyJson(level))
}

/// `DELETE /levels/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let removed = store
    .delete_level(RecordId::from(id.as_str()))
    .await
    .map_err(ApiError::store)?;
  if !removed {
    return Err(not_found(&id));
  }
  Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: &str) -> ApiError {
  ApiError::NotFound(format!("level {id} not found"))
}
