//! Palette types and utilities
//!
//! This module provides the tile color type, palette entries, palette data
//! validation and the related error types.

mod color;
mod error;
mod palette;

pub use color::Rgb;
pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, PaletteEntry, PaletteRecord, PaletteWarning};
