pub mod params;
pub mod schema;

pub use params::Parameters;
pub use schema::{BarConfig, GlobalConfig, ModuleConfig};

use bar_core::{BarError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `BarConfig::default()` if
/// the file doesn't exist so the bar always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<BarConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(BarConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| BarError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse configuration from TOML text.
pub fn parse(raw: &str) -> Result<BarConfig> {
    toml::from_str(raw).map_err(|e| BarError::Config(format!("TOML parse error: {e}")))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("bar").join("bar.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load("/nonexistent/bar/bar.toml").unwrap();
        assert_eq!(cfg.global.interval_ms, 1_000);
        assert_eq!(cfg.modules.len(), 2);
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = parse("[[modules]\nkind =").unwrap_err();
        assert!(matches!(err, BarError::Config(_)));
    }
}
