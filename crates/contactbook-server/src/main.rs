//! contactbook server binary.
//!
//! Reads `contactbook.toml` (or the path given with `--config`), honours
//! `PORT` and `DATABASE_URL`, opens the SQLite store once, and serves the
//! JSON API over HTTP.
//!
//! ```
//! PORT=5000 DATABASE_URL=sqlite://contacts.db cargo run -p contactbook-server
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use contactbook_server::{Overrides, load_config};
use contactbook_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "contactbook HTTP API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "contactbook.toml")]
  config: PathBuf,

  /// Port to listen on.
  #[arg(long, env = "PORT")]
  port: Option<u16>,

  /// Database connection string, e.g. `sqlite://contacts.db`.
  #[arg(long, env = "DATABASE_URL")]
  database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = load_config(&cli.config, Overrides {
    port:         cli.port,
    database_url: cli.database_url,
  })
  .context("failed to load configuration")?;

  // Open the store once; every request shares this handle.
  let store = SqliteStore::connect(&server_cfg.database_url)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.database_url))?;
  tracing::info!(database_url = %server_cfg.database_url, "store opened");

  let app = contactbook_server::router(Arc::new(store));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
