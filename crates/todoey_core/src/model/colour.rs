//! Category colour value and palette.
//!
//! # Invariants
//! - A `Colour` always holds exactly six upper-case hex digits, no `#`.
//! - Palette entries are valid `Colour` strings.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static HEX_COLOUR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6})$").expect("valid hex colour regex"));

/// Fallback colour used when nothing else is known.
pub const DEFAULT_COLOUR: &str = "3478F6";

/// Flat colours that new categories are drawn from.
pub const PALETTE: &[&str] = &[
    "E74C3C", "E67E22", "FFCC00", "F0DEB4", "34495E", "2B2B2B", "9B59B6", "3A6F81", "3498DB",
    "2ECC71", "1ABC9C", "ECF0F1", "95A5A6", "345F41", "745EC5", "5E4534", "5E345E", "EF717A",
    "A5C63B", "F47CC3", "79302A", "A38671", "B8C9F1", "5065A0",
];

const FLAT_BLACK: &str = "2B2B2B";
const FLAT_WHITE: &str = "ECF0F1";

/// Rejected colour input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidColour(pub String);

impl Display for InvalidColour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid hex colour `{}`; expected six hex digits", self.0)
    }
}

impl Error for InvalidColour {}

/// Hex RGB colour stored on a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour(String);

impl Colour {
    /// Parses `RRGGBB` or `#RRGGBB`, case-insensitively.
    pub fn parse(raw: &str) -> Result<Self, InvalidColour> {
        let trimmed = raw.trim();
        let digits = HEX_COLOUR_RE
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| InvalidColour(trimmed.to_string()))?;
        Ok(Self(digits.as_str().to_ascii_uppercase()))
    }

    /// Picks a palette colour using the thread-local RNG.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    /// Picks a palette colour using the provided RNG.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let hex = PALETTE.choose(rng).copied().unwrap_or(DEFAULT_COLOUR);
        Self(hex.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |start: usize| u8::from_str_radix(&self.0[start..start + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }

    /// Scales every channel towards black by `fraction` (clamped to 0..=1).
    ///
    /// List rows use `row / row_count` to shade a category's items.
    pub fn darken(&self, fraction: f32) -> Self {
        let keep = 1.0 - fraction.clamp(0.0, 1.0);
        let (r, g, b) = self.rgb();
        let scale = |value: u8| (f32::from(value) * keep).round() as u8;
        Self::from_rgb(scale(r), scale(g), scale(b))
    }

    /// Flat black or flat white, whichever reads better on this colour.
    pub fn contrast_text(&self) -> Self {
        let (r, g, b) = self.rgb();
        let luminance =
            (0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)) / 255.0;
        if luminance > 0.5 {
            Self(FLAT_BLACK.to_string())
        } else {
            Self(FLAT_WHITE.to_string())
        }
    }

    fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("{r:02X}{g:02X}{b:02X}"))
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self(DEFAULT_COLOUR.to_string())
    }
}

impl Display for Colour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Colour {
    type Error = InvalidColour;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Colour> for String {
    fn from(value: Colour) -> Self {
        value.0
    }
}
