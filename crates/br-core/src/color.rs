use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::CoreError;

/// Straight (non-premultiplied) RGBA fill color.
///
/// # Example
/// ```
/// use br_core::color::Rgba;
/// let c: Rgba = "#7FFF00".parse().unwrap();
/// assert_eq!(c, Rgba::new(127, 255, 0, 255));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    /// Fully transparent black, the canvas clear value.
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);
    /// Chartreuse, used for the favicon.
    pub const CHARTREUSE: Self = Self([127, 255, 0, 255]);
    /// Opaque black.
    pub const BLACK: Self = Self([0, 0, 0, 255]);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }
}

impl FromStr for Rgba {
    type Err = CoreError;

    /// Parse `#RRGGBB` (alpha 255) or `#RRGGBBAA`. The leading `#` is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidColor {
            value: s.to_string(),
        };
        let hex = s.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }

        let mut out = [0u8, 0, 0, 255];
        for (i, slot) in out.iter_mut().enumerate().take(hex.len() / 2) {
            *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(out))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

/// TOML accepts either `[r, g, b, a]` or a hex string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Array([u8; 4]),
    Hex(String),
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ColorRepr::deserialize(deserializer)? {
            ColorRepr::Array(rgba) => Ok(Self(rgba)),
            ColorRepr::Hex(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}
