//! JSON REST API for Docflow.
//!
//! Exposes an axum [`Router`] backed by any
//! [`docflow_core::store::DocumentStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = docflow_api::api_router(Arc::new(store));
//! ```

pub mod error;
pub mod index;
pub mod lookup;
pub mod records;
pub mod registry;

use std::sync::Arc;

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use docflow_core::{
  Record,
  employee::Employee,
  incoming::IncomingDocument,
  memo::Memo,
  order::Order,
  outgoing::OutgoingDocument,
  report::Report,
  store::{DocumentStore, RecordStore},
};

pub use error::{ApiError, Detail};
pub use registry::{Registry, ResourceInfo};

/// Router state: the store plus the registry of mounted resources.
pub struct ApiState<S> {
  pub store:    Arc<S>,
  pub registry: Arc<Registry>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      registry: Arc::clone(&self.registry),
    }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: DocumentStore + 'static,
{
  let mut registry = Registry::default();

  let router = Router::new()
    .route("/", get(index::handler::<S>))
    .merge(resource::<S, Employee>(&mut registry))
    .merge(resource::<S, IncomingDocument>(&mut registry))
    .merge(resource::<S, OutgoingDocument>(&mut registry))
    .merge(resource::<S, Memo>(&mut registry))
    .merge(resource::<S, Report>(&mut registry))
    .merge(resource::<S, Order>(&mut registry))
    .fallback(fallback);

  router.with_state(ApiState {
    store,
    registry: Arc::new(registry),
  })
}

/// Mount the CRUD routes of `R` and register it.
fn resource<S, R>(registry: &mut Registry) -> Router<ApiState<S>>
where
  S: RecordStore<R> + 'static,
  R: Record,
{
  registry.register::<R>();

  let collection = format!("/{}", R::RESOURCE);
  let collection_routes = || {
    get(records::list::<S, R>).post(records::create::<S, R>)
  };

  Router::new()
    .route(&collection, collection_routes())
    .route(&format!("{collection}/"), collection_routes())
    .route(
      &format!("{collection}/{{id}}"),
      get(records::get_one::<S, R>)
        .put(records::replace::<S, R>)
        .patch(records::patch::<S, R>)
        .delete(records::delete::<S, R>),
    )
}

async fn fallback() -> impl IntoResponse {
  (StatusCode::NOT_FOUND, Json(Detail::new("Not Found")))
}

#[cfg(test)]
mod tests;
