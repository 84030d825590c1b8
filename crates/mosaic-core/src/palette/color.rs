//! 8-bit RGB color type
//!
//! Tiles are flat physical colors, so the pipeline works directly on
//! gamma-encoded 8-bit channels. No linearization is involved anywhere.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::ParseColorError;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Pure black, the substitute for unreadable pixels.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white, the background behind transparent pixels.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from 8-bit channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from loosely typed channel values.
    ///
    /// If any channel is non-finite or outside `0.0..=255.0`, the whole
    /// triple is treated as black. Fractional values are rounded.
    ///
    /// # Example
    /// ```
    /// use mosaic_core::Rgb;
    ///
    /// assert_eq!(Rgb::from_channels(10.0, 20.4, 30.6), Rgb::new(10, 20, 31));
    /// assert_eq!(Rgb::from_channels(f64::NAN, 20.0, 30.0), Rgb::BLACK);
    /// assert_eq!(Rgb::from_channels(300.0, 20.0, 30.0), Rgb::BLACK);
    /// ```
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        let valid = |v: f64| v.is_finite() && (0.0..=255.0).contains(&v);
        if valid(r) && valid(g) && valid(b) {
            Self::new(r.round() as u8, g.round() as u8, b.round() as u8)
        } else {
            Self::BLACK
        }
    }

    /// Uppercase `#RRGGBB` representation.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Perceptual luminance `0.299R + 0.587G + 0.114B`.
    #[inline]
    pub fn luminance(self) -> f32 {
        0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32
    }

    /// Whether text drawn on this color should be dark.
    ///
    /// Dark text above a luminance of 128, light text at or below it.
    #[inline]
    pub fn prefers_dark_text(self) -> bool {
        self.luminance() > 128.0
    }

    /// Euclidean distance in RGB space.
    #[inline]
    pub fn distance(self, other: Rgb) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (case-insensitive,
    /// surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
