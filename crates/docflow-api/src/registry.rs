//! The resource registry.
//!
//! Built once while the router is assembled: every mounted [`Record`] type
//! registers itself here, and the registry is shared with handlers through
//! the router state.

use docflow_core::Record;
use serde::{Deserialize, Serialize};

/// Listing metadata for one mounted resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceInfo {
  /// URL path segment, e.g. `memos`.
  pub name:        String,
  /// Collection path, e.g. `/memos/`.
  pub path:        String,
  pub label:       String,
  pub tag:         String,
  pub description: String,
}

#[derive(Debug, Default)]
pub struct Registry {
  resources: Vec<ResourceInfo>,
}

impl Registry {
  /// Record `R` as mounted. Registration order is the listing order.
  pub fn register<R: Record>(&mut self) {
    self.resources.push(ResourceInfo {
      name:        R::RESOURCE.to_owned(),
      path:        format!("/{}/", R::RESOURCE),
      label:       R::LABEL.to_owned(),
      tag:         R::TAG.to_owned(),
      description: R::DESCRIPTION.to_owned(),
    });
  }

  pub fn resources(&self) -> &[ResourceInfo] { &self.resources }
}
