//! Error types for palette operations

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for loading palette data.
///
/// Data-quality problems inside individual entries are not errors; they are
/// collected as [`PaletteWarning`](super::PaletteWarning)s. Only data that
/// cannot be read at all ends up here.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// The palette document could not be parsed
    #[error("failed to parse palette '{name}': {message}")]
    Parse {
        /// Palette id
        name: String,
        /// Parser message
        message: String,
    },

    /// A palette id that is not loaded
    #[error("unknown palette: {0}")]
    UnknownPalette(String),
}
