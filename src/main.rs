//! tele: live per-device telemetry windows from a JSON line feed.
//!
//! Run with:  `RUST_LOG=info tele [path/to/tele.toml]`

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging; RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("tele v{} starting", env!("CARGO_PKG_VERSION"));

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(tele_config::default_path);
    let config = tele_config::load(&path)?;

    tele_app::run(config).await.map_err(Into::into)
}
