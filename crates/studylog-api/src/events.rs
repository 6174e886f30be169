//! Handlers for `/events` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/events` | Optional `?from=` / `?to=` ISO-8601 bounds, inclusive |
//! | `POST`   | `/events` | Body: `{"nazwa":"...","data":"2025-12-01T15:00:00","lokalizacja":"..."}` |
//! | `GET`    | `/events/:id` | 404 if not found |
//! | `DELETE` | `/events/:id` | 204, or 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use studylog_core::{
  RecordId,
  event::{Event, EventRange, NewEvent},
  store::StudyStore,
};

use crate::{error::ApiError, json::PrettyJson};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListParams {
  /// Lower bound; ignored if it does not parse.
  pub from: Option<String>,
  /// Upper bound; ignored if it does not parse.
  pub to:   Option<String>,
}

impl ListParams {
  /// Pick the first `from` and `to` out of the raw query pairs. Repeats and
  /// unknown keys are ignored.
  pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
    let mut params = Self::default();
    for (key, value) in pairs {
      let slot = match key.as_str() {
        "from" => &mut params.from,
        "to" => &mut params.to,
        _ => continue,
      };
      slot.get_or_insert(value);
    }
    params
  }
}

/// `GET /events[?from=...][&to=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<PrettyJson<Vec<Event>>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Query(pairs) = query?;
  let params = ListParams::from_pairs(pairs);
  let range = EventRange::from_query(params.from.as_deref(), params.to.as_deref());
  let events = store.list_events(&range).await.map_err(ApiError::store)?;
  Ok(PrettyJson(events))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub nazwa:       Option<String>,
  pub data:        Option<String>,
  pub lokalizacja: Option<String>,
}

/// `POST /events` — returns 201 + the stored [`Event`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(body) = body?;
  let input = NewEvent::parse(
    body.nazwa.as_deref(),
    body.data.as_deref(),
    body.lokalizacja.as_deref(),
  )?;
  let event = store.add_event(input).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, PrettyJson(event)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /events/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<PrettyJson<Event>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let event = store
    .get_event(RecordId::from(id.as_str()))
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("event {id} not found")))?;
  Ok(PrettyJson(event))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /events/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let removed = store
    .delete_event(RecordId::from(id.as_str()))
    .await
    .map_err(ApiError::store)?;
  if !removed {
    return Err(ApiError::NotFound(format!("event {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
