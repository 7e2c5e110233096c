use crate::params::Parameters;
use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `bar.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Global settings applied to every module.
    pub global: GlobalConfig,
    /// Modules in display order, left to right.
    pub modules: Vec<ModuleConfig>,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            modules: vec![ModuleConfig::new("media"), ModuleConfig::new("bluetooth")],
        }
    }
}

/// Global bar settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Poll interval for every module, in milliseconds.
    pub interval_ms: u64,
    /// dmenu-compatible command used to show popup menus.
    pub menu_command: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            interval_ms:  1_000,
            menu_command: "rofi -dmenu -i".to_string(),
        }
    }
}

/// Config block for a single module instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Module type identifier, e.g. `"bluetooth"` or `"media"`.
    pub kind: String,
    /// Optional instance name; defaults to the kind.
    #[serde(default)]
    pub name: Option<String>,
    /// Every other key, forwarded to the module at construction.
    #[serde(default, flatten)]
    pub options: toml::Table,
}

impl ModuleConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            options: toml::Table::new(),
        }
    }

    /// Instance identifier: the configured name, or the kind.
    pub fn id(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.kind)
    }

    /// Flatten the extra options into string parameters.
    pub fn params(&self) -> Parameters {
        Parameters::from_table(&self.options)
    }
}
