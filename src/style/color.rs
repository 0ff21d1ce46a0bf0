//! Colors used for feature paint and the thematic ramp.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Fill for features with a missing or non-numeric thematic value.
    pub const MISSING_GRAY: Rgb = Rgb::new(204, 204, 204);

    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }
}

impl fmt::Display for Rgb {
    /// Format as CSS hex: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = String;

    /// Parse `#rrggbb` (leading `#` optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("invalid color '{s}': expected #rrggbb"))
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16)
            .map_err(|_| format!("invalid color '{s}': bad hex digits"));

        Ok(Rgb { r: channel(0..2)?, g: channel(2..4)?, b: channel(4..6)? })
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Sequential yellow-to-red ramp, one color per thematic class in ascending order.
pub const DEFAULT_RAMP: [Rgb; 5] = [
    Rgb::new(255, 255, 178),
    Rgb::new(254, 204,  92),
    Rgb::new(253, 141,  60),
    Rgb::new(240,  59,  32),
    Rgb::new(189,   0,  38),
];
