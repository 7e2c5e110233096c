use bar_core::{BarError, Gesture, Result};
use std::collections::BTreeMap;
use tracing::warn;

/// Flat string → string parameters for one module instance.
///
/// Resolved once at construction.  Keys a module doesn't ask for are ignored;
/// keys it asks for but that are missing fall back to the module's default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    values: BTreeMap<String, String>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stringify scalar TOML values; tables, arrays and datetimes are skipped.
    pub fn from_table(table: &toml::Table) -> Self {
        let mut values = BTreeMap::new();
        for (key, value) in table {
            let text = match value {
                toml::Value::String(s)  => s.clone(),
                toml::Value::Integer(n) => n.to_string(),
                toml::Value::Float(f)   => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    warn!(key = key.as_str(), kind = other.type_str(), "ignoring non-scalar module option");
                    continue;
                }
            };
            values.insert(key.clone(), text);
        }
        Self { values }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// A gesture name such as `LEFT_CLICK`; unknown names are a config error.
    pub fn gesture(&self, key: &str, default: Gesture) -> Result<Gesture> {
        match self.get(key) {
            Some(name) => name.parse().map_err(|e| match e {
                BarError::Config(msg) => BarError::Config(format!("parameter '{key}': {msg}")),
                other => other,
            }),
            None => Ok(default),
        }
    }

    pub fn usize_or(&self, key: &str, default: usize) -> Result<usize> {
        match self.get(key) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                BarError::Config(format!("parameter '{key}': '{raw}' is not a non-negative integer"))
            }),
            None => Ok(default),
        }
    }

    /// Accepts `true/false`, `yes/no`, `on/off` and `1/0`.
    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        let Some(raw) = self.get(key) else {
            return Ok(default);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1"  => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(BarError::Config(format!("parameter '{key}': '{raw}' is not a boolean"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let p = Parameters::new();
        assert_eq!(p.get_or("device", "hci0"), "hci0");
        assert_eq!(p.gesture("menu", Gesture::SecondaryClick).unwrap(), Gesture::SecondaryClick);
        assert_eq!(p.usize_or("scroll_width", 30).unwrap(), 30);
        assert!(p.bool_or("scroll_bounce", true).unwrap());
    }

    #[test]
    fn invalid_gesture_names_fail() {
        let p = Parameters::new().with("next", "SCROLL_SIDEWAYS");
        assert!(matches!(p.gesture("next", Gesture::PrimaryClick), Err(BarError::Config(_))));
    }

    #[test]
    fn parses_booleans_loosely() {
        let p = Parameters::new().with("a", "Yes").with("b", "0").with("c", "maybe");
        assert!(p.bool_or("a", false).unwrap());
        assert!(!p.bool_or("b", true).unwrap());
        assert!(p.bool_or("c", true).is_err());
    }

    #[test]
    fn table_values_are_stringified() {
        let mut table = toml::Table::new();
        table.insert("width".into(), toml::Value::Integer(20));
        table.insert("bounce".into(), toml::Value::Boolean(false));
        table.insert("nested".into(), toml::Value::Array(vec![]));
        let p = Parameters::from_table(&table);
        assert_eq!(p.get("width"), Some("20"));
        assert_eq!(p.get("bounce"), Some("false"));
        assert_eq!(p.get("nested"), None);
    }
}
