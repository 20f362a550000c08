//! Hex color tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A color string that is not `#rrggbb`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid color '{0}' (expected #rrggbb)")]
pub struct ColorError(pub String);

/// An opaque sRGB color, written as `"#rrggbb"` in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Color from components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components as an array.
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_hex() {
        let c: Rgb = "#64B4ff".parse().unwrap();
        assert_eq!(c, Rgb::new(100, 180, 255));
        assert_eq!(c.to_string(), "#64b4ff");
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["64b4ff", "#64b4f", "#64b4ffaa", "#gg0000", "#ü0000", ""] {
            assert!(bad.parse::<Rgb>().is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn error_message_names_the_input() {
        let err = "blue".parse::<Rgb>().unwrap_err();
        assert_eq!(err.to_string(), "invalid color 'blue' (expected #rrggbb)");
    }
}
