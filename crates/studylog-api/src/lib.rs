//! JSON REST API for studylog.
//!
//! Exposes an axum [`Router`] backed by any [`studylog_core::store::StudyStore`].
//! Static assets, page rendering and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", studylog_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod events;
pub mod json;
pub mod levels;
pub mod subjects;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use studylog_core::store::StudyStore;

pub use error::ApiError;
pub use json::PrettyJson;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: StudyStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Subjects
    .route("/subjects", get(subjects::list::<S>).post(subjects::create::<S>))
    .route(
      "/subjects/{id}",
      get(subjects::get_one::<S>).delete(subjects::delete_one::<S>),
    )
    .route(
      "/subjects/{id}/session_complete",
      post(subjects::session_complete::<S>),
    )
    // Events
    .route("/events", get(events::list::<S>).post(events::create::<S>))
    .route(
      "/events/{id}",
      get(events::get_one::<S>).delete(events::delete_one::<S>),
    )
    // Levels (legacy)
    .route("/levels", get(levels::list::<S>).post(levels::create::<S>))
    .route(
      "/levels/{id}",
      get(levels::get_one::<S>)
        .put(levels::update::<S>)
        .delete(levels::delete_one::<S>),
    )
    .with_state(store)
}

#[cfg(test)]
mod tests;
