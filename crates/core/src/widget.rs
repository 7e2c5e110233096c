use crate::{error::BarError, scroll::Scroller};
use tracing::debug;

/// Marker shown when a module cannot determine its state.
pub const UNKNOWN_TEXT: &str = "?";

/// Rendering classification of a widget, used by the host for theming.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Unknown,
    Active,
    Inactive,
    Custom(String),
}

impl DisplayState {
    /// Classify a boolean-like property (powered, playing, …).
    pub fn from_flag(flag: bool) -> Self {
        if flag { Self::Active } else { Self::Inactive }
    }

    /// Default status tags handed to the host.
    pub fn tags(&self) -> Vec<String> {
        let tag = match self {
            Self::Unknown   => "unknown",
            Self::Active    => "ON",
            Self::Inactive  => "OFF",
            Self::Custom(s) => s.as_str(),
        };
        vec![tag.to_string()]
    }
}

/// The text a module shows in the bar, plus its display state.
///
/// Purely presentational: it is mutated by its owning module after each poll
/// and read by the host when drawing.  Nothing here talks to the outside world.
#[derive(Debug, Clone)]
pub struct StatusWidget {
    text:         String,
    state:        DisplayState,
    unknown_text: String,
    scroller:     Option<Scroller>,
}

impl StatusWidget {
    pub fn new() -> Self {
        Self {
            text:         String::new(),
            state:        DisplayState::Unknown,
            unknown_text: UNKNOWN_TEXT.to_string(),
            scroller:     None,
        }
    }

    /// Override the text shown in the unknown state.  An empty marker hides
    /// the widget while the source is unavailable.
    pub fn with_unknown_text(mut self, text: impl Into<String>) -> Self {
        self.unknown_text = text.into();
        self
    }

    /// Window long text through `scroller` at render time.
    pub fn with_scroller(mut self, scroller: Scroller) -> Self {
        self.scroller = Some(scroller);
        self
    }

    pub fn show(&mut self, text: impl Into<String>, state: DisplayState) {
        self.text = text.into();
        self.state = state;
    }

    pub fn mark_unknown(&mut self) {
        self.text = self.unknown_text.clone();
        self.state = DisplayState::Unknown;
    }

    /// Apply the outcome of one poll.  Any error degrades to the unknown
    /// state; the error itself only goes to the log.
    pub fn refresh(&mut self, module: &str, outcome: Result<(String, DisplayState), BarError>) {
        match outcome {
            Ok((text, state)) => self.show(text, state),
            Err(e) => {
                debug!(module, kind = e.kind(), error = %e, "poll failed; showing unknown");
                self.mark_unknown();
            }
        }
    }

    /// Unscrolled display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Full text for the current frame.  Advances the scroller, if any.
    pub fn render(&mut self) -> String {
        match self.scroller.as_mut() {
            Some(scroller) => scroller.apply(&self.text),
            None => self.text.clone(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for StatusWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden_and_unknown() {
        let w = StatusWidget::new();
        assert!(w.is_hidden());
        assert_eq!(w.state(), &DisplayState::Unknown);
    }

    #[test]
    fn failure_does_not_leak_previous_state() {
        let mut w = StatusWidget::new();
        w.refresh("test", Ok(("On".into(), DisplayState::Active)));
        w.refresh("test", Err(BarError::Connection("gone".into())));
        assert_eq!(w.render(), "?");
        assert_eq!(w.state().tags(), vec!["unknown"]);

        w.refresh("test", Ok(("Off".into(), DisplayState::Inactive)));
        assert_eq!(w.render(), "Off");
        assert_eq!(w.state().tags(), vec!["OFF"]);
    }

    #[test]
    fn empty_unknown_marker_hides_widget() {
        let mut w = StatusWidget::new().with_unknown_text("");
        w.refresh("test", Err(BarError::Property("missing".into())));
        assert!(w.is_hidden());
    }

    #[test]
    fn render_goes_through_scroller() {
        let mut w = StatusWidget::new().with_scroller(Scroller::new(4));
        w.show("abcdef", DisplayState::Active);
        assert_eq!(w.render(), "abcd");
        assert_eq!(w.render(), "bcde");
        assert_eq!(w.text(), "abcdef");
    }
}
