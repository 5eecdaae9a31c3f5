//! `GET /`: service name, version and the mounted resources.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{ApiState, registry::ResourceInfo};

pub const TITLE: &str = "Electronic Document Management System";
pub const DESCRIPTION: &str = "API for managing documents and employees";
pub const VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceIndex {
  pub title:       String,
  pub description: String,
  pub version:     String,
  pub resources:   Vec<ResourceInfo>,
}

/// `GET /`
pub async fn handler<S>(State(state): State<ApiState<S>>) -> Json<ServiceIndex> {
  Json(ServiceIndex {
    title:       TITLE.to_owned(),
    description: DESCRIPTION.to_owned(),
    version:     VERSION.to_owned(),
    resources:   state.registry.resources().to_vec(),
  })
}
