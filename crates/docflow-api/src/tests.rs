use std::{sync::Arc, time::Duration};

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use chrono::{DateTime, Utc};
use docflow_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use super::*;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store))
}

async fn send(
  app:    &Router,
  method: &str,
  uri:    &str,
  body:   Option<Value>,
) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(body) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };
  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

async fn send_raw(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
  let req = Request::builder()
    .method(method)
    .uri(uri)
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap();
  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  (status, serde_json::from_slice(&bytes).unwrap())
}

fn timestamp(value: &Value) -> DateTime<Utc> {
  value.as_str().unwrap().parse().unwrap()
}

/// Let the clock advance so a refreshed `updated_at` is strictly later.
async fn tick() { tokio::time::sleep(Duration::from_millis(5)).await }

/// `after` is a later revision of `before`: same id and creation time,
/// strictly newer `updated_at`.
fn assert_refreshed(before: &Value, after: &Value) {
  assert_eq!(after["id"], before["id"]);
  assert_eq!(after["created_at"], before["created_at"]);
  assert!(timestamp(&after["updated_at"]) > timestamp(&before["updated_at"]));
}

fn ivanov() -> Value {
  json!({
    "full_name": "Ivanov I.I.",
    "position": "Engineer",
    "email": "ivanov@example.com"
  })
}

async fn create_employee(app: &Router, email: &str) -> Value {
  let mut body = ivanov();
  body["email"] = json!(email);
  let (status, employee) = send(app, "POST", "/employees/", Some(body)).await;
  assert_eq!(status, StatusCode::OK);
  employee
}

fn letter(method: &str) -> Value {
  json!({
    "recipient_id": "ACME Ltd.",
    "subject": "Contract draft",
    "delivery_method": method
  })
}

// ── Employee lifecycle ────────────────────────────────────────────────────────

#[tokio::test]
async fn employee_lifecycle() {
  let app = app().await;

  let (status, created) =
    send(&app, "POST", "/employees/", Some(ivanov())).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(created["id"], 1);
  assert_eq!(created["full_name"], "Ivanov I.I.");
  assert_eq!(created["phone"], Value::Null);
  assert_eq!(created["created_at"], created["updated_at"]);

  tick().await;
  let (status, patched) = send(
    &app,
    "PATCH",
    "/employees/1",
    Some(json!({"phone": "12345"})),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(patched["phone"], "12345");
  assert_eq!(patched["full_name"], "Ivanov I.I.");
  assert_eq!(patched["email"], "ivanov@example.com");
  assert_refreshed(&created, &patched);

  let (status, fetched) = send(&app, "GET", "/employees/1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched, patched);

  let (status, deleted) = send(&app, "DELETE", "/employees/1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(deleted["detail"], "Employee with id=1 deleted");

  let mut body = ivanov();
  body["position"] = json!("Manager");
  let (status, missing) = send(&app, "PUT", "/employees/1", Some(body)).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(missing["detail"], "Employee with id=1 not found");
}

#[tokio::test]
async fn missing_record_is_404_for_every_verb() {
  let app = app().await;

  for (method, body) in [
    ("GET", None),
    ("PUT", Some(ivanov())),
    ("PATCH", Some(json!({}))),
    ("DELETE", None),
  ] {
    let (status, error) = send(&app, method, "/employees/7", body).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
    assert_eq!(error["detail"], "Employee with id=7 not found");
  }
}

#[tokio::test]
async fn list_paginates_in_id_order() {
  let app = app().await;
  for email in ["a@example.com", "b@example.com", "c@example.com"] {
    create_employee(&app, email).await;
  }

  let (status, all) = send(&app, "GET", "/employees/", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(all.as_array().unwrap().len(), 3);

  let (_, page) = send(&app, "GET", "/employees?skip=1&limit=1", None).await;
  let page = page.as_array().unwrap();
  assert_eq!(page.len(), 1);
  assert_eq!(page[0]["email"], "b@example.com");

  let (_, past_end) = send(&app, "GET", "/employees/?skip=10", None).await;
  assert_eq!(past_end, json!([]));
}

#[tokio::test]
async fn negative_skip_is_rejected() {
  let app = app().await;
  let (status, error) = send(&app, "GET", "/employees/?skip=-1", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(error["detail"].is_string());
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
  let app = app().await;
  let (status, error) = send(&app, "GET", "/employees/abc", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(error["detail"].is_string());
}

// ── Full and partial update ───────────────────────────────────────────────────

#[tokio::test]
async fn put_clears_omitted_optional_fields() {
  let app = app().await;
  let mut body = ivanov();
  body["phone"] = json!("12345");
  body["note"] = json!("first floor");
  let (_, created) = send(&app, "POST", "/employees/", Some(body)).await;

  tick().await;
  let mut body = ivanov();
  body["position"] = json!("Manager");
  let (status, replaced) = send(&app, "PUT", "/employees/1", Some(body)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(replaced["position"], "Manager");
  assert_eq!(replaced["phone"], Value::Null);
  assert_eq!(replaced["note"], Value::Null);
  assert_refreshed(&created, &replaced);
}

#[tokio::test]
async fn put_without_required_field_is_a_storage_failure() {
  let app = app().await;
  let created = create_employee(&app, "ivanov@example.com").await;

  let (status, error) = send(
    &app,
    "PUT",
    "/employees/1",
    Some(json!({"position": "Manager"})),
  )
  .await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(error["detail"], "Internal Server Error");

  let (_, unchanged) = send(&app, "GET", "/employees/1", None).await;
  assert_eq!(unchanged, created);
}

#[tokio::test]
async fn patch_null_clears_nullable_field() {
  let app = app().await;
  let mut body = ivanov();
  body["note"] = json!("first floor");
  body["phone"] = json!("12345");
  send(&app, "POST", "/employees/", Some(body)).await;

  let (status, patched) =
    send(&app, "PATCH", "/employees/1", Some(json!({"note": null}))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(patched["note"], Value::Null);
  assert_eq!(patched["phone"], "12345");
}

#[tokio::test]
async fn duplicate_email_is_a_storage_failure() {
  let app = app().await;
  create_employee(&app, "dup@example.com").await;

  let mut body = ivanov();
  body["email"] = json!("dup@example.com");
  let (status, error) = send(&app, "POST", "/employees/", Some(body)).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(error["detail"], "Internal Server Error");
}

// ── Full and partial update per resource ──────────────────────────────────────

#[tokio::test]
async fn incoming_put_and_patch() {
  let app = app().await;
  let (_, created) = send(
    &app,
    "POST",
    "/incoming/",
    Some(json!({
      "sender_id": "Tax office",
      "subject": "Audit notice",
      "resolution": "Forward to accounting",
      "note": "urgent"
    })),
  )
  .await;

  tick().await;
  let (status, replaced) = send(
    &app,
    "PUT",
    "/incoming/1",
    Some(json!({"sender_id": "City council", "subject": "Permit renewal"})),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(replaced["sender_id"], "City council");
  assert_eq!(replaced["subject"], "Permit renewal");
  assert_eq!(replaced["resolution"], Value::Null);
  assert_eq!(replaced["note"], Value::Null);
  assert_refreshed(&created, &replaced);

  tick().await;
  let (status, patched) = send(
    &app,
    "PATCH",
    "/incoming/1",
    Some(json!({"resolution": "Approve"})),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(patched["resolution"], "Approve");
  assert_eq!(patched["sender_id"], "City council");
  assert_eq!(patched["subject"], "Permit renewal");
  assert_eq!(patched["note"], Value::Null);
  assert_refreshed(&replaced, &patched);
}

#[tokio::test]
async fn outgoing_put_and_patch() {
  let app = app().await;
  let mut body = letter("email");
  body["note"] = json!("registered");
  let (_, created) = send(&app, "POST", "/outgoing/", Some(body)).await;

  tick().await;
  let (status, replaced) = send(
    &app,
    "PUT",
    "/outgoing/1",
    Some(json!({
      "recipient_id": "Globex Corp.",
      "subject": "Signed contract",
      "delivery_method": "mail"
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(replaced["recipient_id"], "Globex Corp.");
  assert_eq!(replaced["subject"], "Signed contract");
  assert_eq!(replaced["delivery_method"], "mail");
  assert_eq!(replaced["note"], Value::Null);
  assert_refreshed(&created, &replaced);

  tick().await;
  let (status, patched) = send(
    &app,
    "PATCH",
    "/outgoing/1",
    Some(json!({"note": "sent twice"})),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(patched["note"], "sent twice");
  assert_eq!(patched["recipient_id"], "Globex Corp.");
  assert_eq!(patched["subject"], "Signed contract");
  assert_eq!(patched["delivery_method"], "mail");
  assert_refreshed(&replaced, &patched);
}

#[tokio::test]
async fn memo_put_and_patch_re_embed_author() {
  let app = app().await;
  let first = create_employee(&app, "first@example.com").await;
  let second = create_employee(&app, "second@example.com").await;
  let (_, created) = send(
    &app,
    "POST",
    "/memos/",
    Some(json!({"author_id": 1, "content": "Renew the extinguishers", "note": "floor 2"})),
  )
  .await;
  assert_eq!(created["author"], first);

  tick().await;
  let (status, replaced) = send(
    &app,
    "PUT",
    "/memos/1",
    Some(json!({"author_id": 2, "content": "Renew the first aid kits"})),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(replaced["author_id"], 2);
  assert_eq!(replaced["author"], second);
  assert_eq!(replaced["content"], "Renew the first aid kits");
  assert_eq!(replaced["note"], Value::Null);
  assert_refreshed(&created, &replaced);

  tick().await;
  let (status, patched) =
    send(&app, "PATCH", "/memos/1", Some(json!({"author_id": 1}))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(patched["author_id"], 1);
  assert_eq!(patched["author"], first);
  assert_eq!(patched["content"], "Renew the first aid kits");
  assert_refreshed(&replaced, &patched);
}

#[tokio::test]
async fn report_put_and_patch() {
  let app = app().await;
  create_employee(&app, "first@example.com").await;
  let second = create_employee(&app, "second@example.com").await;
  let (_, created) = send(
    &app,
    "POST",
    "/reports/",
    Some(json!({"author_id": 1, "note": "Monthly report"})),
  )
  .await;

  tick().await;
  let (status, replaced) = send(
    &app,
    "PUT",
    "/reports/1",
    Some(json!({"author_id": 2, "note": "Quarterly report"})),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(replaced["author"], second);
  assert_eq!(replaced["note"], "Quarterly report");
  assert_refreshed(&created, &replaced);

  tick().await;
  let (status, patched) = send(
    &app,
    "PATCH",
    "/reports/1",
    Some(json!({"note": "Annual report"})),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(patched["note"], "Annual report");
  assert_eq!(patched["author_id"], 2);
  assert_refreshed(&replaced, &patched);
}

#[tokio::test]
async fn order_put_and_patch_re_embed_signer() {
  let app = app().await;
  let director = create_employee(&app, "director@example.com").await;
  let deputy = create_employee(&app, "deputy@example.com").await;
  let (_, created) = send(
    &app,
    "POST",
    "/orders/",
    Some(json!({"content": "On the leave schedule", "signer_id": 1, "note": "draft"})),
  )
  .await;
  assert_eq!(created["signer"], director);

  tick().await;
  let (status, replaced) = send(
    &app,
    "PUT",
    "/orders/1",
    Some(json!({"content": "On the holiday schedule", "signer_id": 2})),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(replaced["content"], "On the holiday schedule");
  assert_eq!(replaced["signer_id"], 2);
  assert_eq!(replaced["signer"], deputy);
  assert_eq!(replaced["note"], Value::Null);
  assert_refreshed(&created, &replaced);

  tick().await;
  let (status, patched) =
    send(&app, "PATCH", "/orders/1", Some(json!({"signer_id": 1}))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(patched["signer"], director);
  assert_eq!(patched["content"], "On the holiday schedule");
  assert_eq!(patched["note"], Value::Null);
  assert_refreshed(&replaced, &patched);
}

// ── Request bodies ────────────────────────────────────────────────────────────

#[tokio::test]
async fn malformed_json_is_unprocessable() {
  let app = app().await;
  let (status, error) =
    send_raw(&app, "POST", "/employees/", "{\"full_name\": ").await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert!(error["detail"].is_string());
}

#[tokio::test]
async fn missing_required_field_on_create_is_unprocessable() {
  let app = app().await;
  let (status, error) = send(
    &app,
    "POST",
    "/employees/",
    Some(json!({"full_name": "Ivanov I.I."})),
  )
  .await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert!(error["detail"].as_str().unwrap().contains("position"));

  let (_, all) = send(&app, "GET", "/employees/", None).await;
  assert_eq!(all, json!([]));
}

// ── Outgoing delivery method ──────────────────────────────────────────────────

#[tokio::test]
async fn outgoing_rejects_unknown_delivery_method() {
  let app = app().await;

  let (status, error) =
    send(&app, "POST", "/outgoing/", Some(letter("fax"))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(error["detail"].as_str().unwrap().contains("fax"));

  let (_, all) = send(&app, "GET", "/outgoing/", None).await;
  assert_eq!(all, json!([]));
}

#[tokio::test]
async fn outgoing_updates_with_unknown_method_leave_record_unchanged() {
  let app = app().await;
  let (status, created) =
    send(&app, "POST", "/outgoing/", Some(letter("email"))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(created["delivery_method"], "email");

  let (status, _) = send(&app, "PUT", "/outgoing/1", Some(letter("fax"))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) = send(
    &app,
    "PATCH",
    "/outgoing/1",
    Some(json!({"delivery_method": "fax", "subject": "Changed"})),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (_, current) = send(&app, "GET", "/outgoing/1", None).await;
  assert_eq!(current, created);

  let (status, patched) = send(
    &app,
    "PATCH",
    "/outgoing/1",
    Some(json!({"delivery_method": "mail"})),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(patched["delivery_method"], "mail");
  assert_eq!(patched["subject"], "Contract draft");
}

// ── Employee references ───────────────────────────────────────────────────────

#[tokio::test]
async fn memo_embeds_author() {
  let app = app().await;
  let author = create_employee(&app, "ivanov@example.com").await;

  let (status, memo) = send(
    &app,
    "POST",
    "/memos/",
    Some(json!({"author_id": 1, "content": "Renew the extinguishers"})),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(memo["author_id"], 1);
  assert_eq!(memo["author"], author);
  assert_eq!(memo["note"], Value::Null);
}

#[tokio::test]
async fn order_with_unknown_signer_is_a_storage_failure() {
  let app = app().await;
  let (status, error) = send(
    &app,
    "POST",
    "/orders/",
    Some(json!({"content": "On leave", "signer_id": 42})),
  )
  .await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(error["detail"], "Internal Server Error");
}

#[tokio::test]
async fn report_lifecycle() {
  let app = app().await;
  create_employee(&app, "ivanov@example.com").await;

  let (status, report) = send(
    &app,
    "POST",
    "/reports",
    Some(json!({"author_id": 1, "note": "Monthly report"})),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(report["author"]["email"], "ivanov@example.com");

  let (status, deleted) = send(&app, "DELETE", "/reports/1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(deleted["detail"], "Report with id=1 deleted");
}

// ── Index and fallback ────────────────────────────────────────────────────────

#[tokio::test]
async fn index_lists_mounted_resources() {
  let app = app().await;
  let (status, index) = send(&app, "GET", "/", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(index["title"], "Electronic Document Management System");
  assert_eq!(index["version"], "1.0");

  let names: Vec<_> = index["resources"]
    .as_array()
    .unwrap()
    .iter()
    .map(|r| r["name"].as_str().unwrap().to_owned())
    .collect();
  assert_eq!(names, [
    "employees", "incoming", "outgoing", "memos", "reports", "orders"
  ]);
}

#[tokio::test]
async fn unknown_path_is_404() {
  let app = app().await;
  let (status, error) = send(&app, "GET", "/invoices/", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(error["detail"], "Not Found");
}
