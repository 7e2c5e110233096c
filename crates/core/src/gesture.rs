use crate::error::BarError;
use std::fmt;
use std::str::FromStr;

/// An abstracted pointer input on a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    PrimaryClick,
    SecondaryClick,
    MiddleClick,
    ScrollUp,
    ScrollDown,
}

impl Gesture {
    pub const ALL: [Gesture; 5] = [
        Gesture::PrimaryClick,
        Gesture::SecondaryClick,
        Gesture::MiddleClick,
        Gesture::ScrollUp,
        Gesture::ScrollDown,
    ];

    /// Name used in configuration files (`LEFT_CLICK`, `SCROLL_UP`, …).
    pub fn config_name(self) -> &'static str {
        match self {
            Self::PrimaryClick   => "LEFT_CLICK",
            Self::SecondaryClick => "RIGHT_CLICK",
            Self::MiddleClick    => "MIDDLE_CLICK",
            Self::ScrollUp       => "SCROLL_UP",
            Self::ScrollDown     => "SCROLL_DOWN",
        }
    }

    /// Map an X11-style pointer button number (1 = left … 5 = wheel down).
    pub fn from_button(button: u32) -> Option<Self> {
        match button {
            1 => Some(Self::PrimaryClick),
            2 => Some(Self::MiddleClick),
            3 => Some(Self::SecondaryClick),
            4 => Some(Self::ScrollUp),
            5 => Some(Self::ScrollDown),
            _ => None,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}

impl FromStr for Gesture {
    type Err = BarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.config_name() == name)
            .ok_or_else(|| {
                let legal: Vec<&str> = Self::ALL.iter().map(|g| g.config_name()).collect();
                BarError::Config(format!(
                    "unknown button '{name}' (expected one of {})",
                    legal.join(", ")
                ))
            })
    }
}
