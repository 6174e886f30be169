//! HTTP server assembly for studylog.
//!
//! Mounts the JSON API under `/api` and, optionally, serves a directory of
//! static assets (pages, manifest, service worker, icons) for every other
//! path.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use serde::Deserialize;
use studylog_core::store::StudyStore;
use tower_http::{services::ServeDir, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `STUDYLOG_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Directory holding `subjects.json`, `events.json` and `levels.json`.
  pub data_dir:   PathBuf,
  /// If set, files under this directory are served for non-API paths.
  pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       5000,
      data_dir:   PathBuf::from("data"),
      static_dir: None,
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path`, then `STUDYLOG_*` environment
  /// variables, then an explicit data directory override.
  pub fn load(
    path: &Path,
    data_dir: Option<PathBuf>,
  ) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("STUDYLOG"))
      .set_override_option(
        "data_dir",
        data_dir.map(|p| p.to_string_lossy().into_owned()),
      )?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application [`Router`]: the API under `/api`, static files as the
/// fallback when `static_dir` is given, and request tracing on everything.
pub fn router<S>(store: Arc<S>, static_dir: Option<&Path>) -> Router
where
  S: StudyStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut app = Router::new().nest("/api", studylog_api::api_router(store));
  if let Some(dir) = static_dir {
    app = app.fallback_service(ServeDir::new(dir));
  }
  app.layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
