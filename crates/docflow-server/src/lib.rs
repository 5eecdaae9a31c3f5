//! HTTP server for Docflow.
//!
//! Loads [`ServerConfig`], opens the SQLite store and wraps the
//! `docflow-api` router with request tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use docflow_core::store::DocumentStore;
use docflow_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Store path that selects a throwaway in-memory database.
pub const IN_MEMORY: &str = ":memory:";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `DOCFLOW_*` environment variables. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       8000,
      store_path: PathBuf::from("docflow.db"),
    }
  }
}

impl ServerConfig {
  /// Read `path` if it exists, then overlay `DOCFLOW_*` variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("DOCFLOW").try_parsing(true))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Store ────────────────────────────────────────────────────────────────────

/// Open the store at `path`, expanding a leading `~/`. [`IN_MEMORY`] opens
/// an in-memory database.
pub async fn open_store(path: &Path) -> docflow_store_sqlite::Result<SqliteStore> {
  if path == Path::new(IN_MEMORY) {
    return SqliteStore::open_in_memory().await;
  }
  SqliteStore::open(expand_tilde(path)).await
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router with request tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: DocumentStore + 'static,
{
  docflow_api::api_router(store).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::Value;
  use tower::ServiceExt as _;

  fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir()
      .join(format!("docflow-{name}-{}.toml", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn missing_config_file_yields_defaults() {
    let path = std::env::temp_dir().join("docflow-does-not-exist.toml");
    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.address(), "127.0.0.1:8000");
  }

  #[test]
  fn config_file_overrides_some_fields() {
    let path = write_config("partial", "port = 9100\nstore_path = \"/srv/docflow.db\"\n");
    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 9100);
    assert_eq!(cfg.store_path, PathBuf::from("/srv/docflow.db"));
  }

  #[test]
  fn expand_tilde_leaves_plain_paths_alone() {
    assert_eq!(expand_tilde(Path::new("data/docflow.db")), PathBuf::from("data/docflow.db"));
    assert_eq!(expand_tilde(Path::new(IN_MEMORY)), PathBuf::from(IN_MEMORY));
  }

  #[test]
  fn expand_tilde_uses_home() {
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(
        expand_tilde(Path::new("~/docflow.db")),
        PathBuf::from(home).join("docflow.db")
      );
    }
  }

  #[tokio::test]
  async fn traced_router_serves_the_api() {
    let store = open_store(Path::new(IN_MEMORY)).await.unwrap();
    let app = router(Arc::new(store));

    let req = Request::builder()
      .method("POST")
      .uri("/incoming/")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(
        r#"{"sender_id":"Tax office","subject":"Audit notice"}"#,
      ))
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder().uri("/incoming/1").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let doc: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(doc["subject"], "Audit notice");
    assert_eq!(doc["resolution"], Value::Null);
  }

  #[tokio::test]
  async fn file_store_persists_across_reopen() {
    let path = std::env::temp_dir()
      .join(format!("docflow-reopen-{}.db", std::process::id()));
    std::fs::remove_file(&path).ok();

    let req = Request::builder()
      .method("POST")
      .uri("/employees/")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(
        r#"{"full_name":"Ivanov I.I.","position":"Engineer","email":"ivanov@example.com"}"#,
      ))
      .unwrap();

    let store = open_store(&path).await.unwrap();
    let resp = router(Arc::new(store)).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let store = open_store(&path).await.unwrap();
    let get = Request::builder().uri("/employees/1").body(Body::empty()).unwrap();
    let resp = router(Arc::new(store)).oneshot(get).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    for suffix in ["", "-wal", "-shm"] {
      let mut file = path.clone().into_os_string();
      file.push(suffix);
      std::fs::remove_file(file).ok();
    }
  }
}
