// Palette store
//
// Light and dark palettes for the widget. Each palette carries the resting
// "follow" color, the dimmed "idle" color and the ordered accent colors the
// color cycler walks through.

use std::fmt;

use ratatui::style::Color;
use serde::Deserialize;

use super::Theme;
use crate::app::config::ConfigError;

/// An sRGB color written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string (the leading `#` is required)
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(raw.to_string());

        let hex = raw.trim().strip_prefix('#').ok_or_else(invalid)?;
        // from_str_radix alone would accept a sign ("+F")
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Terminal color for rendering
    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Colors used by one theme
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Palette {
    /// Base color in follow and thinking modes
    pub follow_color: HexColor,

    /// Base color in idle mode
    pub idle_color: HexColor,

    /// Accent colors visited by the color cycler, in order.
    /// An empty list turns cycling off for this theme.
    #[serde(default)]
    pub cycle_colors: Vec<HexColor>,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            follow_color: HexColor::new(0x61, 0x72, 0x80),
            idle_color: HexColor::new(0x65, 0x7C, 0x89),
            cycle_colors: vec![
                HexColor::new(0x15, 0x5D, 0xFC),
                HexColor::new(0xE7, 0x00, 0x0B),
                HexColor::new(0x19, 0xC3, 0x7D),
                HexColor::new(0xFF, 0xB4, 0x00),
                HexColor::new(0x99, 0x30, 0xFF),
            ],
        }
    }

    pub fn dark() -> Self {
        Self {
            follow_color: HexColor::new(0xC9, 0xD3, 0xDD),
            idle_color: HexColor::new(0x4B, 0x5D, 0x70),
            cycle_colors: vec![
                HexColor::new(0x38, 0xBD, 0xF8),
                HexColor::new(0xFB, 0x71, 0x85),
                HexColor::new(0x4A, 0xDE, 0x80),
                HexColor::new(0xFA, 0xCC, 0x15),
                HexColor::new(0xA8, 0x55, 0xF7),
            ],
        }
    }
}

/// Light and dark palettes keyed by theme
///
/// The dark palette is optional so a config file can supply only a light
/// one; lookups for a missing theme fall back to light.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaletteStore {
    pub light: Palette,
    #[serde(default)]
    pub dark: Option<Palette>,
}

impl PaletteStore {
    /// Palette for `theme`, or the light palette when none is configured
    pub fn palette_for(&self, theme: Theme) -> &Palette {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => self.dark.as_ref().unwrap_or(&self.light),
        }
    }
}

impl Default for PaletteStore {
    fn default() -> Self {
        Self {
            light: Palette::light(),
            dark: Some(Palette::dark()),
        }
    }
}
