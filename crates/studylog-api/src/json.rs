//! Indented JSON responses.

use axum::{
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use serde::Serialize;

/// Like [`axum::Json`], but pretty-prints the body.
#[derive(Debug, Clone)]
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
  fn into_response(self) -> Response {
    match serde_json::to_vec_pretty(&self.0) {
      Ok(body) => {
        ([(header::CONTENT_TYPE, "application/json")], body).into_response()
      }
      Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
  }
}
