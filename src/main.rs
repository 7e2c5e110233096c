//! bar: D-Bus backed status modules speaking the i3bar protocol.
//!
//! Run with:  `RUST_LOG=info bar [CONFIG]`

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging on stderr; stdout carries the bar protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("bar v{} starting", env!("CARGO_PKG_VERSION"));

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(bar_config::default_path);
    let config = bar_config::load(&path)
        .with_context(|| format!("loading config from '{}'", path.display()))?;

    bar_host::run(config).await.map_err(Into::into)
}
