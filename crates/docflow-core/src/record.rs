//! The [`Record`] trait, implemented once per stored entity.
//!
//! A record type names its resource, its three input payloads and the merge
//! rule for partial updates. Together the six implementations form the
//! schema registry consumed by the storage and HTTP layers.

use serde::{Serialize, de::DeserializeOwned};

use crate::Result;

/// Auto-assigned surrogate primary key shared by every record.
pub type RecordId = i64;

/// A stored entity with create, full-update and partial-update payloads.
pub trait Record: Clone + Serialize + Send + Sync + 'static {
  /// Creation payload: all required fields present.
  type New: DeserializeOwned + Send + 'static;
  /// Full-update payload: every column is overwritten, absent means empty.
  type Replace: DeserializeOwned + Send + 'static;
  /// Partial-update payload: only fields present in the request change.
  type Patch: DeserializeOwned + Send + 'static;

  /// URL path segment, e.g. `employees`.
  const RESOURCE: &'static str;
  /// Human-readable entity name used in response messages.
  const LABEL: &'static str;
  /// Grouping tag shown in the service index.
  const TAG: &'static str;
  const DESCRIPTION: &'static str;

  fn id(&self) -> RecordId;

  /// Reject a creation payload before anything is written.
  fn validate_new(_input: &Self::New) -> Result<()> { Ok(()) }

  /// Reject a full-update payload before anything is written.
  fn validate_replace(_input: &Self::Replace) -> Result<()> { Ok(()) }

  /// Merge the explicitly-set fields of `patch` into `self`.
  ///
  /// On error `self` is left untouched.
  fn apply_patch(&mut self, patch: Self::Patch) -> Result<()>;
}
