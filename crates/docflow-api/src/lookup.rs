//! Fetch-or-fail lookup shared by every handler addressing a single record.

use docflow_core::{Record, RecordId, store::RecordStore};

use crate::error::ApiError;

/// The not-found error for record `R` with `id`.
pub fn not_found<R: Record>(id: RecordId) -> ApiError {
  ApiError::NotFound(format!("{} with id={id} not found", R::LABEL))
}

/// Return the stored record `id`, or a not-found error naming the entity and
/// the id.
pub async fn fetch_or_404<S, R>(store: &S, id: RecordId) -> Result<R, ApiError>
where
  S: RecordStore<R>,
  R: Record,
{
  store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found::<R>(id))
}
