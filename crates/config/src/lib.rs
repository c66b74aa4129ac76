pub mod schema;

pub use schema::{BufferConfig, ChartConfig, TelemetryConfig, TransportConfig, TransportKind};

use std::path::{Path, PathBuf};
use tele_core::{Result, TelemetryError};

/// Load configuration from a TOML file.  Returns `TelemetryConfig::default()`
/// if the file doesn't exist so the service always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<TelemetryConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(TelemetryConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| TelemetryError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse and validate a TOML document.
pub fn parse(raw: &str) -> Result<TelemetryConfig> {
    let config: TelemetryConfig =
        toml::from_str(raw).map_err(|e| TelemetryError::Config(format!("TOML parse error: {e}")))?;
    validate(&config)?;
    Ok(config)
}

/// Reject values the rest of the service cannot work with.
pub fn validate(config: &TelemetryConfig) -> Result<()> {
    if config.buffer.capacity == 0 {
        return Err(TelemetryError::Config("buffer.capacity must be at least 1".into()));
    }
    if config.transport.channel_capacity == 0 {
        return Err(TelemetryError::Config(
            "transport.channel_capacity must be at least 1".into(),
        ));
    }
    if config.transport.kind == TransportKind::Tcp && config.transport.address.trim().is_empty() {
        return Err(TelemetryError::Config("transport.address is empty".into()));
    }
    Ok(())
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("tele").join("tele.toml")
}
