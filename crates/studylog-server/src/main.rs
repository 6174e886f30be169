//! studylog server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), prepares the
//! JSON data directory, and serves the REST API over HTTP.
//!
//! ```
//! cargo run -p studylog-server -- --data-dir ~/studylog
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use studylog_server::ServerConfig;
use studylog_store_json::JsonStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "studylog API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Directory holding the JSON collections; overrides the config file.
  #[arg(long)]
  data_dir: Option<PathBuf>,
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

  let server_cfg = ServerConfig::load(&cli.config, cli.data_dir)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  // Expand `~` in configured paths.
  let data_dir = expand_tilde(&server_cfg.data_dir);
  let static_dir = server_cfg.static_dir.as_deref().map(expand_tilde);

  // Create the data directory and empty collections on first run.
  let store = JsonStore::open(&data_dir)
    .await
    .with_context(|| format!("failed to initialise store at {data_dir:?}"))?;
  tracing::info!(data_dir = %data_dir.display(), "store ready");

  let app = studylog_server::router(Arc::new(store), static_dir.as_deref());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
