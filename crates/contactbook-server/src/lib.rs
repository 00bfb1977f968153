//! HTTP server wiring for contactbook.
//!
//! Loads [`ServerConfig`], and wraps the JSON API from `contactbook-api` in
//! the transport layers the server needs (CORS, request tracing).

use std::{path::Path, sync::Arc};

use axum::Router;
use contactbook_core::store::ContactStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "contactbook.db";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  /// SQLite connection string, e.g. `sqlite://contacts.db` or `:memory:`.
  pub database_url: String,
}

/// Values that take precedence over everything else, typically `--port` /
/// `PORT` and `--database-url` / `DATABASE_URL`.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
  pub port:         Option<u16>,
  pub database_url: Option<String>,
}

/// Assemble a [`ServerConfig`] from, in increasing precedence: built-in
/// defaults, the optional TOML file at `file`, `CONTACTBOOK_*` environment
/// variables, and `overrides`.
pub fn load_config(
  file: &Path,
  overrides: Overrides,
) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", DEFAULT_HOST)?
    .set_default("port", i64::from(DEFAULT_PORT))?
    .set_default("database_url", DEFAULT_DATABASE_URL)?
    .add_source(config::File::from(file).required(false))
    .add_source(config::Environment::with_prefix("CONTACTBOOK"))
    .set_override_option("port", overrides.port.map(i64::from))?
    .set_override_option("database_url", overrides.database_url)?
    .build()?
    .try_deserialize()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: the API under `/api`, with permissive
/// CORS and HTTP tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: ContactStore + 'static,
{
  Router::new()
    .nest("/api", contactbook_api::api_router(store))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use contactbook_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  fn temp_file(contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir()
      .join(format!("contactbook-{}.toml", uuid::Uuid::new_v4()));
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn missing_file_yields_defaults() {
    let cfg = load_config(Path::new("/nonexistent/contactbook.toml"), Overrides::default())
      .unwrap();
    assert_eq!(cfg.host, DEFAULT_HOST);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
  }

  #[test]
  fn file_values_override_defaults() {
    let path = temp_file("host = \"127.0.0.1\"\nport = 8080\n");
    let cfg = load_config(&path, Overrides::default()).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
  }

  #[test]
  fn explicit_overrides_win() {
    let path = temp_file("port = 8080\ndatabase_url = \"file.db\"\n");
    let cfg = load_config(&path, Overrides {
      port:         Some(9000),
      database_url: Some("sqlite://override.db".into()),
    })
    .unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.database_url, "sqlite://override.db");
  }

  #[tokio::test]
  async fn api_is_mounted_with_cors() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let req = Request::builder()
      .method("GET")
      .uri("/api/contacts")
      .header(header::ORIGIN, "http://localhost:5173")
      .body(Body::empty())
      .unwrap();

    let resp = router(Arc::new(store)).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!([]));
  }

  #[tokio::test]
  async fn unknown_route_is_404() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let req = Request::builder()
      .uri("/contacts")
      .body(Body::empty())
      .unwrap();
    let resp = router(Arc::new(store)).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
