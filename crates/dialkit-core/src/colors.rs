//! CSS hex colors for configuration files and recorded draw commands.

use peniko::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color: {0:?} (expected #rgb, #rrggbb or #rrggbbaa)")]
pub struct ColorParseError(pub String);

/// An RGBA8 color that serializes as `#rrggbb` (or `#rrggbbaa` when not opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Convert to a peniko color.
    pub fn to_color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl From<Color> for HexColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<HexColor> for Color {
    fn from(color: HexColor) -> Self {
        color.to_color()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|n| n * 17)
                .map_err(|_| err())
        };

        match hex.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(err()),
        }
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Palette defaults shared by knobs and bar graphs.
pub mod defaults {
    use super::HexColor;

    /// Track background.
    pub const BACKGROUND: HexColor = HexColor::rgb(0x18, 0x18, 0x18);
    /// Filled portion and value text.
    pub const FOREGROUND: HexColor = HexColor::rgb(0xff, 0x88, 0x00);
    /// Secondary knob label.
    pub const LABEL: HexColor = HexColor::rgb(0xff, 0xff, 0xff);
    /// Bar graph scale markers.
    pub const MARKERS: HexColor = HexColor::rgb(0x88, 0x88, 0x88);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!("#ff8800".parse::<HexColor>().unwrap(), HexColor::rgb(255, 136, 0));
        assert_eq!("#FF8800".parse::<HexColor>().unwrap(), HexColor::rgb(255, 136, 0));
        assert_eq!("#f80".parse::<HexColor>().unwrap(), HexColor::rgb(255, 136, 0));
        assert_eq!(
            "#18181880".parse::<HexColor>().unwrap(),
            HexColor::new(0x18, 0x18, 0x18, 0x80)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("ff8800".parse::<HexColor>().is_err());
        assert!("#ff88".parse::<HexColor>().is_err());
        assert!("#gg8800".parse::<HexColor>().is_err());
        assert!("#ü8800".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        assert_eq!(HexColor::rgb(0x18, 0x18, 0x18).to_string(), "#181818");
        assert_eq!(HexColor::new(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&defaults::FOREGROUND).unwrap();
        assert_eq!(json, r##""#ff8800""##);
        let back: HexColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, defaults::FOREGROUND);
    }

    #[test]
    fn test_peniko_conversion() {
        let color: Color = defaults::MARKERS.into();
        assert_eq!(HexColor::from(color), defaults::MARKERS);
    }
}
