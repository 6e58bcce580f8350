//! Timeline display colors.
//!
//! Elements carry a display color in their timeline options; project files
//! store it as `#rrggbb` / `#rrggbbaa` hex, which is what the asset
//! ingestion side hands us.

use serde::{Deserialize, Serialize};

use crate::error::{CutlineError, Result};

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(CutlineError::InvalidParameter(format!("bad hex color: {s}")));
        }
        let byte = |i: usize| -> Result<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| CutlineError::InvalidParameter(format!("bad hex color: {s}")))
        };
        match hex.len() {
            6 => Ok(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(CutlineError::InvalidParameter(format!(
                "bad hex color: {s}"
            ))),
        }
    }

    /// Format as `#rrggbb` (alpha omitted when fully opaque).
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    // Default clip palette, cycled at ingestion.
    pub const SLATE: Self = Self::opaque(0x5a, 0x6b, 0x8c);
    pub const TEAL: Self = Self::opaque(0x2f, 0x8f, 0x83);
    pub const AMBER: Self = Self::opaque(0xc9, 0x8a, 0x2e);
    pub const PLUM: Self = Self::opaque(0x8c, 0x5a, 0x8a);
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::SLATE
    }
}
