pub mod bluetooth;
pub mod media;

pub use bluetooth::BluetoothModule;
pub use media::MediaModule;

use bar_bus::Buses;
use bar_config::ModuleConfig;
use bar_core::{ActionMenu, BarError, Launcher, Module, Result};
use std::sync::Arc;

/// Module kinds accepted in `[[modules]]`.
pub const KINDS: &[&str] = &["bluetooth", "media"];

/// Shared collaborators handed to every module at construction.
#[derive(Debug)]
pub struct Context {
    pub buses:    Buses,
    pub launcher: Arc<dyn Launcher>,
    pub menu:     Arc<dyn ActionMenu>,
}

/// Build the module described by `config` under instance id `id`.
///
/// Parameters are validated before any bus is touched, so configuration
/// mistakes are reported even when the bus is down.
pub fn build(id: &str, config: &ModuleConfig, ctx: &Context) -> Result<Box<dyn Module>> {
    let params = config.params();
    match config.kind.as_str() {
        "bluetooth" => Ok(Box::new(BluetoothModule::connect(id, &params, ctx)?)),
        "media"     => Ok(Box::new(MediaModule::connect(id, &params, ctx)?)),
        other => Err(BarError::Config(format!(
            "unknown module kind '{other}' (expected one of {})",
            KINDS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bar_core::testing::{RecordingLauncher, ScriptedMenu};
    use bar_core::MenuSelection;

    fn context() -> Context {
        Context {
            buses:    Buses::new(),
            launcher: Arc::new(RecordingLauncher::new()),
            menu:     Arc::new(ScriptedMenu::answering(MenuSelection::Cancelled)),
        }
    }

    #[test]
    fn unknown_kind_is_config_error() {
        let err = build("weather", &ModuleConfig::new("weather"), &context()).unwrap_err();
        assert!(matches!(err, BarError::Config(_)));
    }

    #[test]
    fn bad_gesture_fails_before_connecting() {
        let mut config = ModuleConfig::new("bluetooth");
        config
            .options
            .insert("menu".into(), toml::Value::String("SCROLL_SIDEWAYS".into()));
        let err = build("bluetooth", &config, &context()).unwrap_err();
        assert!(matches!(err, BarError::Config(_)));
    }
}
