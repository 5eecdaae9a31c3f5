//! Generic CRUD handlers, mounted once per [`Record`] type.
//!
//! | Method   | Path                 | Notes |
//! |----------|----------------------|-------|
//! | `GET`    | `/{resource}/`       | `?skip=0&limit=100`, id order |
//! | `POST`   | `/{resource}/`       | Body: creation payload |
//! | `GET`    | `/{resource}/{id}`   | 404 if not found |
//! | `PUT`    | `/{resource}/{id}`   | Overwrites every field; omitted fields are emptied |
//! | `PATCH`  | `/{resource}/{id}`   | Changes only the fields present in the body |
//! | `DELETE` | `/{resource}/{id}`   | Returns `{"detail": "... deleted"}` |
//!
//! The collection routes answer with and without the trailing slash.

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
};
use docflow_core::{
  Record, RecordId,
  store::{Page, RecordStore},
};

use crate::{
  ApiState,
  error::{ApiError, Detail},
  lookup::{fetch_or_404, not_found},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /{resource}/[?skip=<n>&limit=<n>]`
pub async fn list<S, R>(
  State(state): State<ApiState<S>>,
  page: Result<Query<Page>, QueryRejection>,
) -> Result<Json<Vec<R>>, ApiError>
where
  S: RecordStore<R>,
  R: Record,
{
  let Query(page) = page?;
  let records = state.store.list(page).await.map_err(ApiError::store)?;
  Ok(Json(records))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /{resource}/`
pub async fn create<S, R>(
  State(state): State<ApiState<S>>,
  body: Result<Json<R::New>, JsonRejection>,
) -> Result<Json<R>, ApiError>
where
  S: RecordStore<R>,
  R: Record,
{
  let Json(input) = body?;
  R::validate_new(&input)?;

  let record = state.store.create(input).await.map_err(ApiError::store)?;
  tracing::info!(resource = R::RESOURCE, id = record.id(), "created");
  Ok(Json(record))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /{resource}/{id}`
pub async fn get_one<S, R>(
  State(state): State<ApiState<S>>,
  id: Result<Path<RecordId>, PathRejection>,
) -> Result<Json<R>, ApiError>
where
  S: RecordStore<R>,
  R: Record,
{
  let Path(id) = id?;
  let record = fetch_or_404::<S, R>(&state.store, id).await?;
  Ok(Json(record))
}

// ─── Full update ──────────────────────────────────────────────────────────────

/// `PUT /{resource}/{id}`
pub async fn replace<S, R>(
  State(state): State<ApiState<S>>,
  id: Result<Path<RecordId>, PathRejection>,
  body: Result<Json<R::Replace>, JsonRejection>,
) -> Result<Json<R>, ApiError>
where
  S: RecordStore<R>,
  R: Record,
{
  let Path(id) = id?;
  let Json(input) = body?;

  fetch_or_404::<S, R>(&state.store, id).await?;
  R::validate_replace(&input)?;

  let record = state
    .store
    .replace(id, input)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found::<R>(id))?;
  tracing::info!(resource = R::RESOURCE, id, "replaced");
  Ok(Json(record))
}

// ─── Partial update ───────────────────────────────────────────────────────────

/// `PATCH /{resource}/{id}`
pub async fn patch<S, R>(
  State(state): State<ApiState<S>>,
  id: Result<Path<RecordId>, PathRejection>,
  body: Result<Json<R::Patch>, JsonRejection>,
) -> Result<Json<R>, ApiError>
where
  S: RecordStore<R>,
  R: Record,
{
  let Path(id) = id?;
  let Json(input) = body?;

  let mut record = fetch_or_404::<S, R>(&state.store, id).await?;
  record.apply_patch(input)?;

  let record = state
    .store
    .save(&record)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found::<R>(id))?;
  tracing::info!(resource = R::RESOURCE, id, "patched");
  Ok(Json(record))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /{resource}/{id}`
pub async fn delete<S, R>(
  State(state): State<ApiState<S>>,
  id: Result<Path<RecordId>, PathRejection>,
) -> Result<Json<Detail>, ApiError>
where
  S: RecordStore<R>,
  R: Record,
{
  let Path(id) = id?;
  fetch_or_404::<S, R>(&state.store, id).await?;

  if !state.store.delete(id).await.map_err(ApiError::store)? {
    return Err(not_found::<R>(id));
  }
  tracing::info!(resource = R::RESOURCE, id, "deleted");
  Ok(Json(Detail::new(format!("{} with id={id} deleted", R::LABEL))))
}
