//! RGBA colors and the built-in depth palette.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// An RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

/// Default palette, indexed cyclically by depth.
pub const DEFAULT_PALETTE: [Color; 10] = [
    Color::rgb8(0x4e, 0x79, 0xa7),
    Color::rgb8(0xf2, 0x8e, 0x2b),
    Color::rgb8(0xe1, 0x57, 0x59),
    Color::rgb8(0x76, 0xb7, 0xb2),
    Color::rgb8(0x59, 0xa1, 0x4f),
    Color::rgb8(0xed, 0xc9, 0x48),
    Color::rgb8(0xb0, 0x7a, 0xa1),
    Color::rgb8(0xff, 0x9d, 0xa7),
    Color::rgb8(0x9c, 0x75, 0x5f),
    Color::rgb8(0xba, 0xb0, 0xac),
];

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    /// Create a color from float channels.
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 0xff)
    }

    /// Create a color from 8-bit channels.
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, EngineError> {
        let invalid = || EngineError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        match digits.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::rgb8(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::rgb8(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }

    /// Channels as `[r, g, b, a]`.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from `[r, g, b, a]`.
    #[inline]
    pub fn from_array(c: [f32; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Accepted input encodings for [`Color`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorRepr {
    /// `"#rrggbb"` and friends.
    Hex(String),
    /// `[r, g, b]` or `[r, g, b, a]`.
    Channels(Vec<f32>),
    /// `{ r, g, b, a? }`.
    Struct {
        /// Red channel.
        r: f32,
        /// Green channel.
        g: f32,
        /// Blue channel.
        b: f32,
        /// Alpha channel, opaque when omitted.
        #[serde(default = "opaque")]
        a: f32,
    },
}

fn opaque() -> f32 {
    1.0
}

impl TryFrom<ColorRepr> for Color {
    type Error = EngineError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(hex) => Self::from_hex(&hex),
            ColorRepr::Channels(c) => match c.as_slice() {
                &[r, g, b] => Ok(Self::rgba(r, g, b, 1.0)),
                &[r, g, b, a] => Ok(Self::rgba(r, g, b, a)),
                _ => Err(EngineError::InvalidColor(format!(
                    "{} channels",
                    c.len()
                ))),
            },
            ColorRepr::Struct { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
        }
    }
}
