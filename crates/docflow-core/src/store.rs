//! Storage traits and supporting query types.
//!
//! Backends (e.g. `docflow-store-sqlite`) implement [`RecordStore`] once per
//! record type. Higher layers (`docflow-api`) depend on these traits, not on
//! any concrete backend.

use std::future::Future;

use serde::Deserialize;

use crate::{
  employee::Employee,
  incoming::IncomingDocument,
  memo::Memo,
  order::Order,
  outgoing::OutgoingDocument,
  record::{Record, RecordId},
  report::Report,
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Offset pagination for [`RecordStore::list`]. Deserialises from the
/// `?skip=&limit=` query string; absent values take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Page {
  /// Number of records to skip.
  pub skip:  u32,
  /// Maximum number of records to return.
  pub limit: u32,
}

impl Default for Page {
  fn default() -> Self { Self { skip: 0, limit: 100 } }
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// A storage backend. Carries the error type shared by all record kinds.
pub trait Store: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;
}

/// CRUD access to one record type.
///
/// Every mutating call is a single all-or-nothing storage operation. All
/// methods return `Send` futures so the trait can be used from axum handlers.
pub trait RecordStore<R: Record>: Store {
  /// Insert a new record. `created_at` and `updated_at` are set by the store
  /// to the same instant.
  fn create(
    &self,
    input: R::New,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + '_;

  /// Records in primary-key order, offset by `page.skip` and capped at
  /// `page.limit`.
  fn list(
    &self,
    page: Page,
  ) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  /// Overwrite every column of the record with the payload values; absent
  /// payload fields are written as NULL. Returns `None` if not found.
  fn replace(
    &self,
    id: RecordId,
    input: R::Replace,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  /// Write back a record previously read and merged in memory. Returns the
  /// stored state, or `None` if the record no longer exists.
  fn save<'a>(
    &'a self,
    record: &'a R,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + 'a;

  /// Physically remove a record. Returns `false` if nothing was deleted.
  fn delete(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

/// A backend that stores every record type of the office workflow.
pub trait DocumentStore:
  RecordStore<Employee>
  + RecordStore<IncomingDocument>
  + RecordStore<OutgoingDocument>
  + RecordStore<Memo>
  + RecordStore<Report>
  + RecordStore<Order>
{
}

impl<T> DocumentStore for T where
  T: RecordStore<Employee>
    + RecordStore<IncomingDocument>
    + RecordStore<OutgoingDocument>
    + RecordStore<Memo>
    + RecordStore<Report>
    + RecordStore<Order>
{
}
