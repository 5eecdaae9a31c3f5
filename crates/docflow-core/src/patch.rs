//! Serde support for partial-update payloads.
//!
//! A nullable column in a patch is an `Option<Option<T>>`:
//!
//! | JSON            | Value            | Effect          |
//! |-----------------|------------------|-----------------|
//! | field absent    | `None`           | left untouched  |
//! | `null`          | `Some(None)`     | cleared         |
//! | `"value"`       | `Some(Some(v))`  | overwritten     |
//!
//! Use together with `#[serde(default)]` so an absent field maps to `None`.

use serde::{Deserialize, Deserializer};

/// `deserialize_with` target for nullable patch fields.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}
