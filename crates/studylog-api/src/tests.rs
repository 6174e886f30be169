//! Router tests against a `JsonStore` in a temporary directory.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use studylog_store_json::{Collection, JsonStore};
use tempfile::TempDir;
use tower::ServiceExt as _;

use crate::api_router;

struct Harness {
  _dir:  TempDir,
  store: JsonStore,
}

impl Harness {
  async fn new() -> Self {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open(dir.path()).await.unwrap();
    Self { _dir: dir, store }
  }

  fn router(&self) -> Router {
    api_router(Arc::new(self.store.clone()))
  }

  async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = self
      .router()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn raw_file(&self, c: Collection) -> String {
    tokio::fs::read_to_string(self.store.path(c)).await.unwrap()
  }
}

// ── Subjects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_subject_with_defaults() {
  let h = Harness::new().await;
  let (status, body) = h
    .call("POST", "/subjects", Some(json!({ "nazwa": "Matematyka" })))
    .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["nazwa"], "Matematyka");
  assert_eq!(body["czas_skupienia"], 25);
  assert_eq!(body["level"], 0);
  assert_eq!(body["sessions_completed"], 0);
  assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));

  let (status, list) = h.call("GET", "/subjects", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(list, json!([body]));
}

#[tokio::test]
async fn create_subject_with_explicit_focus() {
  let h = Harness::new().await;
  let (_, body) = h
    .call("POST", "/subjects", Some(json!({ "nazwa": "Fizyka", "czas_skupienia": 40 })))
    .await;
  assert_eq!(body["czas_skupienia"], 40);
  assert_eq!(body["level"], 3);

  let (_, body) = h
    .call("POST", "/subjects", Some(json!({ "nazwa": "Chemia", "czas_skupienia": "abc" })))
    .await;
  assert_eq!(body["czas_skupienia"], 25);
}

#[tokio::test]
async fn create_subject_without_name_is_400() {
  let h = Harness::new().await;
  for payload in [json!({}), json!({ "nazwa": "   " }), json!({ "czas_skupienia": 30 })] {
    let (status, body) = h.call("POST", "/subjects", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("nazwa"), "{body}");
  }
  assert_eq!(h.raw_file(Collection::Subjects).await, "[]");
}

#[tokio::test]
async fn malformed_body_is_400_with_error_object() {
  let h = Harness::new().await;
  let req = Request::builder()
    .method("POST")
    .uri("/subjects")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{nope"))
    .unwrap();
  let resp = h.router().oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn oversized_body_keeps_413_with_error_object() {
  let h = Harness::new().await;
  let huge = format!(r#"{{"nazwa":"{}"}}"#, "a".repeat(3 * 1024 * 1024));
  let req = Request::builder()
    .method("POST")
    .uri("/subjects")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(huge))
    .unwrap();
  let resp = h.router().oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(body["error"].is_string());
  assert_eq!(h.raw_file(Collection::Subjects).await, "[]");
}

#[tokio::test]
async fn session_complete_progression() {
  let h = Harness::new().await;
  let (_, subject) = h
    .call("POST", "/subjects", Some(json!({ "nazwa": "Historia" })))
    .await;
  let uri = format!("/subjects/{}/session_complete", subject["id"].as_str().unwrap());

  let (status, body) = h.call("POST", &uri, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["sessions_completed"], 1);

  h.call("POST", &uri, None).await;
  let (_, body) = h.call("POST", &uri, None).await;
  assert_eq!(body["sessions_completed"], 0);
  assert_eq!(body["czas_skupienia"], 30);
  assert_eq!(body["level"], 1);
}

#[tokio::test]
async fn session_complete_unknown_subject_is_404() {
  let h = Harness::new().await;
  let (status, body) = h
    .call("POST", "/subjects/does-not-exist/session_complete", None)
    .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn get_and_delete_subject() {
  let h = Harness::new().await;
  let (_, subject) = h
    .call("POST", "/subjects", Some(json!({ "nazwa": "Biologia" })))
    .await;
  let uri = format!("/subjects/{}", subject["id"].as_str().unwrap());

  let (status, body) = h.call("GET", &uri, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, subject);

  let (status, _) = h.call("DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _) = h.call("GET", &uri, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _) = h.call("DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_event_validates_date() {
  let h = Harness::new().await;
  let (status, body) = h
    .call(
      "POST",
      "/events",
      Some(json!({ "nazwa": "Egzamin", "data": "2025-12-01T15:00:00" })),
    )
    .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["data"], "2025-12-01T15:00:00");
  assert_eq!(body["lokalizacja"], "");

  let (status, body) = h
    .call("POST", "/events", Some(json!({ "nazwa": "Egzamin", "data": "not-a-date" })))
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("ISO-8601"));

  let (status, _) = h
    .call("POST", "/events", Some(json!({ "nazwa": "Egzamin" })))
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_events_with_range() {
  let h = Harness::new().await;
  for (name, ts) in [
    ("a", "2024-11-30T09:00:00"),
    ("b", "2025-04-10T09:00:00"),
    ("c", "2026-02-01T09:00:00"),
  ] {
    h.call("POST", "/events", Some(json!({ "nazwa": name, "data": ts }))).await;
  }

  let (_, all) = h.call("GET", "/events", None).await;
  assert_eq!(all.as_array().unwrap().len(), 3);

  let (status, filtered) = h
    .call("GET", "/events?from=2025-01-01&to=2025-12-31", None)
    .await;
  assert_eq!(status, StatusCode::OK);
  let names: Vec<_> = filtered
    .as_array()
    .unwrap()
    .iter()
    .map(|e| e["nazwa"].as_str().unwrap())
    .collect();
  assert_eq!(names, ["b"]);

  let (_, bad_bound) = h.call("GET", "/events?from=garbage&to=2025-12-31", None).await;
  assert_eq!(bad_bound.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn repeated_bounds_use_the_first_value() {
  let h = Harness::new().await;
  for (name, ts) in [("a", "2025-03-01T09:00:00"), ("b", "2026-03-01T09:00:00")] {
    h.call("POST", "/events", Some(json!({ "nazwa": name, "data": ts }))).await;
  }

  let (status, body) = h
    .call("GET", "/events?from=2025-01-01&from=2026-01-01&to=2025-12-31&x=1", None)
    .await;
  assert_eq!(status, StatusCode::OK);
  let names: Vec<_> = body
    .as_array()
    .unwrap()
    .iter()
    .map(|e| e["nazwa"].as_str().unwrap())
    .collect();
  assert_eq!(names, ["a"]);

  let (status, body) = h.call("GET", "/events?from=garbage&from=&to", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_unknown_event_is_404_and_store_unchanged() {
  let h = Harness::new().await;
  h.call("POST", "/events", Some(json!({ "nazwa": "x", "data": "2025-01-01" }))).await;
  let before = h.raw_file(Collection::Events).await;

  let (status, _) = h.call("DELETE", "/events/missing", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(h.raw_file(Collection::Events).await, before);
}

#[tokio::test]
async fn get_and_delete_event() {
  let h = Harness::new().await;
  let (_, event) = h
    .call(
      "POST",
      "/events",
      Some(json!({ "nazwa": "Kolokwium", "data": "2025-05-05", "lokalizacja": "A1" })),
    )
    .await;
  let uri = format!("/events/{}", event["id"].as_str().unwrap());

  let (status, body) = h.call("GET", &uri, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["lokalizacja"], "A1");

  let (status, body) = h.call("DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  assert_eq!(body, Value::Null);
  let (status, _) = h.call("GET", &uri, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Levels ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn level_crud() {
  let h = Harness::new().await;
  let (status, level) = h
    .call("POST", "/levels", Some(json!({ "nazwa": "Nowicjusz", "xp": 10, "ikona": "star" })))
    .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(level["ikona"], "star");
  let uri = format!("/levels/{}", level["id"].as_str().unwrap());

  let (status, updated) = h
    .call("PUT", &uri, Some(json!({ "xp": 50, "ikona": null, "kolor": "gold" })))
    .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["nazwa"], "Nowicjusz");
  assert_eq!(updated["xp"], 50);
  assert_eq!(updated["kolor"], "gold");
  assert!(updated.get("ikona").is_none());

  let (status, _) = h.call("PUT", &uri, Some(json!({ "nazwa": "" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (_, list) = h.call("GET", "/levels", None).await;
  assert_eq!(list, json!([updated]));

  let (status, _) = h.call("DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _) = h.call("PUT", &uri, Some(json!({ "xp": 1 }))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn level_requires_name() {
  let h = Harness::new().await;
  let (status, _) = h.call("POST", "/levels", Some(json!({ "xp": 5 }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn responses_are_indented() {
  let h = Harness::new().await;
  h.call("POST", "/subjects", Some(json!({ "nazwa": "Muzyka" }))).await;
  let req = Request::builder().uri("/subjects").body(Body::empty()).unwrap();
  let resp = h.router().oneshot(req).await.unwrap();
  assert_eq!(
    resp.headers().get(header::CONTENT_TYPE).unwrap(),
    "application/json"
  );
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  assert!(std::str::from_utf8(&bytes).unwrap().contains("\n  "));
}
