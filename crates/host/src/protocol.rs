//! The i3bar JSON protocol, as spoken by i3bar, swaybar and compatible bars.
//!
//! Output: a header object, `[`, then one JSON array of blocks per line.
//! Input: `[`, then one click-event object per line, usually comma-prefixed.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// First line written to stdout.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Header {
    pub version:      u32,
    pub click_events: bool,
}

impl Default for Header {
    fn default() -> Self {
        Self { version: 1, click_events: true }
    }
}

/// One rendered module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub full_text: String,
    /// Module kind.
    pub name:      String,
    /// Module instance id; click events carry it back.
    pub instance:  String,
    /// Status tags for theming.  i3bar ignores `_`-prefixed keys.
    #[serde(rename = "_state")]
    pub state:     Vec<String>,
}

/// A click reported by the bar.  Unused fields (coordinates, modifiers) are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClickEvent {
    #[serde(default)]
    pub name:     String,
    #[serde(default)]
    pub instance: Option<String>,
    pub button:   u32,
}

/// Parse one line of the click-event stream.  The opening `[`, blank lines
/// and malformed input yield `None`.
pub fn parse_click(line: &str) -> Option<ClickEvent> {
    let line = line.trim().trim_start_matches(',').trim();
    if line.is_empty() || line == "[" {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(event) => Some(event),
        Err(e) => {
            debug!("ignoring malformed click event: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_enables_click_events() {
        let json = serde_json::to_string(&Header::default()).unwrap();
        assert_eq!(json, r#"{"version":1,"click_events":true}"#);
    }

    #[test]
    fn block_carries_state_tags() {
        let block = Block {
            full_text: "On".into(),
            name:      "bluetooth".into(),
            instance:  "bluetooth".into(),
            state:     vec!["ON".into()],
        };
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(
            json,
            r#"{"full_text":"On","name":"bluetooth","instance":"bluetooth","_state":["ON"]}"#
        );
    }

    #[test]
    fn parses_comma_prefixed_click() {
        let ev = parse_click(r#",{"name":"media","instance":"mpv","button":3,"x":10,"y":4}"#).unwrap();
        assert_eq!(ev.name, "media");
        assert_eq!(ev.instance.as_deref(), Some("mpv"));
        assert_eq!(ev.button, 3);
    }

    #[test]
    fn skips_stream_opener_and_garbage() {
        assert_eq!(parse_click("["), None);
        assert_eq!(parse_click("   "), None);
        assert_eq!(parse_click("{not json"), None);
    }
}
