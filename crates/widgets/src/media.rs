use crate::Context;
use bar_bus::{BusKind, DbusSource};
use bar_config::Parameters;
use bar_core::{
    BarError, DisplayState, Gesture, InputBindingTable, Module, PropertySource, Result, Scroller,
    StatusWidget, Template, Value,
};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::warn;

pub const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
pub const PLAYER_IFACE: &str = "org.mpris.MediaPlayer2.Player";

const DEFAULT_FORMAT: &str = "{artist} - {title}";

/// Fields available in the `format` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackField {
    Album,
    Title,
    Artist,
    TrackNumber,
    PlaybackStatus,
}

impl TrackField {
    /// MPRIS metadata key backing this field, if it comes from metadata.
    fn metadata_key(self) -> Option<&'static str> {
        match self {
            Self::Album          => Some("xesam:album"),
            Self::Title          => Some("xesam:title"),
            Self::Artist         => Some("xesam:artist"),
            Self::TrackNumber    => Some("xesam:trackNumber"),
            Self::PlaybackStatus => None,
        }
    }
}

impl FromStr for TrackField {
    type Err = BarError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "album"          => Ok(Self::Album),
            "title"          => Ok(Self::Title),
            "artist"         => Ok(Self::Artist),
            "trackNumber"    => Ok(Self::TrackNumber),
            "playbackStatus" => Ok(Self::PlaybackStatus),
            other => Err(BarError::Config(format!("unknown track field '{other}'"))),
        }
    }
}

/// Player controls reachable from the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaAction {
    Previous,
    Next,
    PlayPause,
}

impl MediaAction {
    fn method(self) -> &'static str {
        match self {
            Self::Previous  => "Previous",
            Self::Next      => "Next",
            Self::PlayPause => "PlayPause",
        }
    }
}

/// Parameters of the media module:
///
/// | key             | default              |
/// |-----------------|----------------------|
/// | `player`        | `spotify`            |
/// | `format`        | `{artist} - {title}` |
/// | `previous`      | `LEFT_CLICK`         |
/// | `next`          | `RIGHT_CLICK`        |
/// | `pause`         | `MIDDLE_CLICK`       |
/// | `scroll_width`  | `30`                 |
/// | `scroll_speed`  | `1`                  |
/// | `scroll_bounce` | `true`               |
#[derive(Debug, Clone)]
pub struct MediaSettings {
    pub player:   String,
    pub format:   Template<TrackField>,
    pub bindings: Vec<(Gesture, MediaAction)>,
    pub scroller: Scroller,
}

impl MediaSettings {
    pub fn from_params(params: &Parameters) -> Result<Self> {
        let scroller = Scroller::new(params.usize_or("scroll_width", 30)?)
            .with_speed(params.usize_or("scroll_speed", 1)?)
            .with_bounce(params.bool_or("scroll_bounce", true)?);

        Ok(Self {
            player: params.get_or("player", "spotify").to_string(),
            format: Template::parse(params.get_or("format", DEFAULT_FORMAT))?,
            bindings: vec![
                (params.gesture("previous", Gesture::PrimaryClick)?, MediaAction::Previous),
                (params.gesture("next", Gesture::SecondaryClick)?, MediaAction::Next),
                (params.gesture("pause", Gesture::MiddleClick)?, MediaAction::PlayPause),
            ],
            scroller,
        })
    }

    pub fn service(&self) -> String {
        format!("org.mpris.MediaPlayer2.{}", self.player)
    }
}

/// Shows the current track of an MPRIS media player.  Hidden while no
/// player answers.
#[derive(Debug)]
pub struct MediaModule {
    id:       String,
    format:   Template<TrackField>,
    source:   Box<dyn PropertySource>,
    widget:   StatusWidget,
    bindings: InputBindingTable<MediaAction>,
}

impl MediaModule {
    /// Validate `params`, then attach to the player on the session bus.
    pub fn connect(id: &str, params: &Parameters, ctx: &Context) -> Result<Self> {
        let settings = MediaSettings::from_params(params)?;
        let source = DbusSource::connect(&ctx.buses, BusKind::Session, &settings.service(), OBJECT_PATH)?;
        Ok(Self::with_source(id, settings, Box::new(source)))
    }

    pub fn with_source(id: &str, settings: MediaSettings, source: Box<dyn PropertySource>) -> Self {
        let mut bindings = InputBindingTable::new();
        for (gesture, action) in settings.bindings {
            bindings.bind(gesture, action);
        }

        Self {
            id: id.to_string(),
            format: settings.format,
            source,
            widget: StatusWidget::new()
                .with_unknown_text("")
                .with_scroller(settings.scroller),
            bindings,
        }
    }

    fn poll(&self) -> Result<(String, DisplayState)> {
        let metadata = match self.source.get(PLAYER_IFACE, "Metadata")? {
            Value::Map(m) => m,
            other => {
                return Err(BarError::Property(format!(
                    "Metadata is a {}, expected a map",
                    other.type_name()
                )))
            }
        };
        let status = match self.source.get(PLAYER_IFACE, "PlaybackStatus")? {
            Value::Str(s) => s,
            other => {
                return Err(BarError::Property(format!(
                    "PlaybackStatus is a {}, expected a string",
                    other.type_name()
                )))
            }
        };

        let text = self.format.render(|field| resolve(field, &metadata, &status));
        Ok((text, classify(&status)))
    }
}

fn resolve(field: TrackField, metadata: &BTreeMap<String, Value>, status: &str) -> Option<String> {
    match field.metadata_key() {
        Some(key) => metadata.get(key).map(Value::to_string),
        None => Some(status_glyph(status).to_string()),
    }
}

fn status_glyph(status: &str) -> &'static str {
    match status {
        "Playing" => "\u{25B6}",
        "Paused"  => "\u{258D}\u{258D}",
        _ => "",
    }
}

fn classify(status: &str) -> DisplayState {
    match status {
        "Playing" => DisplayState::Active,
        "Paused"  => DisplayState::Inactive,
        other => DisplayState::Custom(other.to_lowercase()),
    }
}

impl Module for MediaModule {
    fn kind(&self) -> &str {
        "media"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn update(&mut self) {
        let outcome = self.poll();
        self.widget.refresh(&self.id, outcome);
    }

    fn widget(&self) -> &StatusWidget {
        &self.widget
    }

    fn widget_mut(&mut self) -> &mut StatusWidget {
        &mut self.widget
    }

    fn state(&self) -> Vec<String> {
        let tag = match self.widget.state() {
            DisplayState::Active    => "playing",
            DisplayState::Inactive  => "paused",
            DisplayState::Custom(s) => s.as_str(),
            DisplayState::Unknown   => "unknown",
        };
        vec![tag.to_string()]
    }

    fn dispatch(&mut self, gesture: Gesture) {
        let Some(action) = self.bindings.lookup(gesture) else {
            return;
        };

        if let Err(e) = self.source.invoke(PLAYER_IFACE, action.method(), &[]) {
            warn!(
                module = self.id.as_str(),
                source = self.source.address(),
                ?action,
                kind = e.kind(),
                "action failed: {e}"
            );
            self.widget.mark_unknown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bar_core::testing::MockSource;

    fn metadata(title: &str, artists: &[&str]) -> Value {
        let mut m = BTreeMap::new();
        m.insert("xesam:title".to_string(), Value::from(title));
        m.insert(
            "xesam:artist".to_string(),
            Value::StrList(artists.iter().map(|a| a.to_string()).collect()),
        );
        m.insert("xesam:album".to_string(), Value::from("Discovery"));
        m.insert("xesam:trackNumber".to_string(), Value::Int(3));
        Value::Map(m)
    }

    fn module(params: Parameters) -> (MockSource, MediaModule) {
        let source = MockSource::new();
        let settings = MediaSettings::from_params(&params).unwrap();
        let module = MediaModule::with_source("media", settings, Box::new(source.clone()));
        (source, module)
    }

    #[test]
    fn renders_default_format() {
        let (source, mut m) = module(Parameters::new());
        source.reply(PLAYER_IFACE, "Metadata", metadata("Digital Love", &["Daft Punk"]));
        source.reply(PLAYER_IFACE, "PlaybackStatus", "Playing");
        m.update();
        assert_eq!(m.widget().text(), "Daft Punk - Digital Love");
        assert_eq!(m.state(), vec!["playing"]);
    }

    #[test]
    fn renders_every_field() {
        let params = Parameters::new()
            .with("format", "{playbackStatus} {trackNumber}. {artist} / {album} / {title}");
        let (source, mut m) = module(params);
        source.reply(PLAYER_IFACE, "Metadata", metadata("Harder", &["Daft Punk", "Kanye"]));
        source.reply(PLAYER_IFACE, "PlaybackStatus", "Paused");
        m.update();
        assert_eq!(m.widget().text(), "\u{258D}\u{258D} 3. Daft Punk,Kanye / Discovery / Harder");
        assert_eq!(m.state(), vec!["paused"]);
    }

    #[test]
    fn missing_metadata_fields_render_empty() {
        let (source, mut m) = module(Parameters::new().with("format", "{album}|{title}"));
        source.reply(PLAYER_IFACE, "Metadata", Value::Map(BTreeMap::new()));
        source.reply(PLAYER_IFACE, "PlaybackStatus", "Stopped");
        m.update();
        assert_eq!(m.widget().text(), "|");
        assert_eq!(m.state(), vec!["stopped"]);
    }

    #[test]
    fn absent_player_hides_widget() {
        let (source, mut m) = module(Parameters::new());
        source.reply(PLAYER_IFACE, "Metadata", metadata("One More Time", &["Daft Punk"]));
        source.reply(PLAYER_IFACE, "PlaybackStatus", "Playing");
        m.update();
        assert!(!m.widget().is_hidden());

        source.fail(PLAYER_IFACE, "Metadata", BarError::Connection);
        m.update();
        assert!(m.widget().is_hidden());
        assert_eq!(m.state(), vec!["unknown"]);
    }

    #[test]
    fn wrong_metadata_type_is_unknown() {
        let (source, mut m) = module(Parameters::new());
        source.reply(PLAYER_IFACE, "Metadata", "not a map");
        source.reply(PLAYER_IFACE, "PlaybackStatus", "Playing");
        m.update();
        assert_eq!(m.widget().state(), &DisplayState::Unknown);
    }

    #[test]
    fn long_titles_scroll() {
        let (source, mut m) = module(Parameters::new().with("scroll_width", "5"));
        source.reply(PLAYER_IFACE, "Metadata", metadata("Aerodynamic", &["Daft Punk"]));
        source.reply(PLAYER_IFACE, "PlaybackStatus", "Playing");
        m.update();
        assert_eq!(m.widget_mut().render(), "Daft ");
        assert_eq!(m.widget_mut().render(), "aft P");
    }

    #[test]
    fn default_bindings_control_player() {
        let (source, mut m) = module(Parameters::new());
        m.dispatch(Gesture::PrimaryClick);
        m.dispatch(Gesture::SecondaryClick);
        m.dispatch(Gesture::MiddleClick);
        m.dispatch(Gesture::ScrollUp);
        assert_eq!(source.invocations(), vec!["Previous", "Next", "PlayPause"]);
    }

    #[test]
    fn rebinding_to_scroll_wheel() {
        let params = Parameters::new().with("next", "SCROLL_UP").with("previous", "SCROLL_DOWN");
        let (source, mut m) = module(params);
        m.dispatch(Gesture::ScrollUp);
        m.dispatch(Gesture::ScrollDown);
        m.dispatch(Gesture::PrimaryClick);
        assert_eq!(source.invocations(), vec!["Next", "Previous"]);
    }

    #[test]
    fn failed_invocation_degrades_to_unknown() {
        let (source, mut m) = module(Parameters::new());
        source.reply(PLAYER_IFACE, "Metadata", metadata("Voyager", &["Daft Punk"]));
        source.reply(PLAYER_IFACE, "PlaybackStatus", "Playing");
        m.update();
        source.fail_writes(BarError::Invocation);
        m.dispatch(Gesture::MiddleClick);
        assert_eq!(m.state(), vec!["unknown"]);
    }

    #[test]
    fn invalid_configuration_fails() {
        assert!(matches!(
            MediaSettings::from_params(&Parameters::new().with("pause", "SCROLL_SIDEWAYS")),
            Err(BarError::Config(_))
        ));
        assert!(matches!(
            MediaSettings::from_params(&Parameters::new().with("format", "{genre}")),
            Err(BarError::Config(_))
        ));
        assert!(matches!(
            MediaSettings::from_params(&Parameters::new().with("scroll_width", "wide")),
            Err(BarError::Config(_))
        ));
    }

    #[test]
    fn service_name_uses_player() {
        let settings = MediaSettings::from_params(&Parameters::new().with("player", "mpv")).unwrap();
        assert_eq!(settings.service(), "org.mpris.MediaPlayer2.mpv");
    }
}
