//! Display preferences chosen in the settings panel.
//!
//! Held in memory only; a reload starts from the defaults again.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Message text size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    /// Every size, in the order the settings panel lists them.
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Value used in form controls and CSS class suffixes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown font size.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown font size: {0}")]
pub struct UnknownFontSize(String);

impl FromStr for FontSize {
    type Err = UnknownFontSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFontSize(s.to_string()))
    }
}

/// Theme and text size of one widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub dark_mode: bool,
    pub font_size: FontSize,
}

impl Preferences {
    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    /// Root classes for the widget container.
    pub fn container_classes(self) -> String {
        let theme = if self.dark_mode { "dark" } else { "light" };
        format!("chat-container {theme} font-{}", self.font_size)
    }
}
