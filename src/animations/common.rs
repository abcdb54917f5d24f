use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Monotonic timestamps and durations, in milliseconds.
pub type Millis = u64;

/// The full opacity range a dot moves through.
pub const ALPHA_RANGE: u8 = 255;

pub const DEFAULT_DURATION: Millis = 600;
pub const DEFAULT_THRESHOLD: f32 = 0.35;

/// The parameters a transition runs with.
///
/// These are copied into every transition when it starts, so changing the
/// controller's timing never affects a fade that is already in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Length of one full fade.
    pub duration: Millis,
    /// Fraction of `duration` after which the next dot is started.
    pub threshold: f32,
}

impl Default for Timing {
    fn default() -> Self {
        Self { duration: DEFAULT_DURATION, threshold: DEFAULT_THRESHOLD }
    }
}

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self::new((argb >> 16) as u8, (argb >> 8) as u8, argb as u8, (argb >> 24) as u8)
    }

    /// Pack this color as `0xAARRGGBB`.
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Get the same color with its alpha channel replaced.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self { a: alpha, ..self }
    }

    /// Flatten this color onto an opaque background.
    ///
    /// Surfaces that can't paint translucent pixels, like terminal cells, use this to emulate
    /// the alpha channel.
    pub fn blend_over(self, background: Color) -> Color {
        let alpha = self.a as u32;
        let mix = |fg: u8, bg: u8| -> u8 {
            let value = fg as u32 * alpha + bg as u32 * (255 - alpha);
            ((value + 127) / 255) as u8
        };
        Color::new(mix(self.r, background.r), mix(self.g, background.g), mix(self.b, background.b), 255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode_upper([self.a, self.r, self.g, self.b]))
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parse `#RRGGBB` or `#AARRGGBB`. The leading `#` is optional.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let digits = input.trim().trim_start_matches('#');
        let bytes = hex::decode(digits).map_err(|e| ColorParseError::InvalidHex(input.to_string(), e))?;
        match bytes.as_slice() {
            &[r, g, b] => Ok(Color::new(r, g, b, 255)),
            &[a, r, g, b] => Ok(Color::new(r, g, b, a)),
            _ => Err(ColorParseError::InvalidLength(input.to_string())),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Errors that can occur when parsing a color
#[derive(thiserror::Error, Debug)]
pub enum ColorParseError {
    #[error("invalid hex color '{0}': {1}")]
    InvalidHex(String, hex::FromHexError),

    #[error("color '{0}' must have 6 (RRGGBB) or 8 (AARRGGBB) hex digits")]
    InvalidLength(String),
}
