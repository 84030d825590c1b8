//! Palette and palette entry types.
//!
//! A [`Palette`] is an ordered list of named tile colors. Order matters:
//! nearest-color matching breaks ties in favor of the earliest entry.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::color::Rgb;

/// One raw palette row as stored in palette data files:
/// `(name, "#RRGGBB", R, G, B)`.
///
/// Channels are signed and wide so that out-of-range data can be reported
/// instead of failing deserialization of the whole file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaletteRecord(pub String, pub String, pub i64, pub i64, pub i64);

/// A named tile color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    /// Display name, unique within its palette
    pub name: String,
    /// Hex representation as listed in the palette data
    pub hex: String,
    /// Numeric color, used for matching
    pub rgb: Rgb,
    /// Color parsed from `hex`, used for drawing (falls back to `rgb`)
    #[serde(skip)]
    pub swatch: Rgb,
}

impl PaletteEntry {
    /// Create an entry whose hex and numeric representations agree.
    pub fn new(name: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            name: name.into(),
            hex: rgb.to_hex(),
            rgb,
            swatch: rgb,
        }
    }
}

/// A data-quality problem found while loading palette records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteWarning {
    /// Hex and numeric RGB disagree; the entry is kept
    HexMismatch {
        /// Entry name
        name: String,
        /// Hex string from the data
        hex: String,
        /// Numeric color from the data
        rgb: Rgb,
    },
    /// Hex string cannot be parsed; the entry is kept and drawn with its RGB
    InvalidHex {
        /// Entry name
        name: String,
        /// Hex string from the data
        hex: String,
    },
    /// A channel is outside 0..=255; the entry is dropped
    ChannelOutOfRange {
        /// Entry name
        name: String,
    },
    /// The name was already used by an earlier entry; the entry is dropped
    DuplicateName {
        /// Entry name
        name: String,
    },
}

impl fmt::Display for PaletteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteWarning::HexMismatch { name, hex, rgb } => write!(
                f,
                "'{name}': hex {hex} does not match RGB ({}, {}, {})",
                rgb.r, rgb.g, rgb.b
            ),
            PaletteWarning::InvalidHex { name, hex } => {
                write!(f, "'{name}': invalid hex color {hex:?}")
            }
            PaletteWarning::ChannelOutOfRange { name } => {
                write!(f, "'{name}': RGB channel outside 0..=255, entry dropped")
            }
            PaletteWarning::DuplicateName { name } => {
                write!(f, "'{name}': duplicate name, entry dropped")
            }
        }
    }
}

/// An ordered list of tile colors.
///
/// # Example
///
/// ```
/// use mosaic_core::{Palette, PaletteEntry, Rgb};
///
/// let palette = Palette::new(
///     "basic",
///     vec![
///         PaletteEntry::new("Black", Rgb::new(5, 19, 29)),
///         PaletteEntry::new("White", Rgb::WHITE),
///     ],
/// );
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.find("White").unwrap().hex, "#FFFFFF");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    id: String,
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Create a palette from already validated entries.
    pub fn new(id: impl Into<String>, entries: Vec<PaletteEntry>) -> Self {
        Self {
            id: id.into(),
            entries,
        }
    }

    /// Build a palette from raw records, validating each one.
    ///
    /// Returns the palette plus every data-quality warning found. Loading
    /// never fails on bad entries: mismatched or unparsable hex values are
    /// kept, out-of-range channels and duplicate names are dropped.
    pub fn from_records(
        id: impl Into<String>,
        records: Vec<PaletteRecord>,
    ) -> (Self, Vec<PaletteWarning>) {
        let mut entries = Vec::with_capacity(records.len());
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for PaletteRecord(name, hex, r, g, b) in records {
            let channel = |v: i64| u8::try_from(v).ok();
            let rgb = match (channel(r), channel(g), channel(b)) {
                (Some(r), Some(g), Some(b)) => Rgb::new(r, g, b),
                _ => {
                    warnings.push(PaletteWarning::ChannelOutOfRange { name });
                    continue;
                }
            };

            if seen.contains(&name) {
                warnings.push(PaletteWarning::DuplicateName { name });
                continue;
            }

            let swatch = match hex.parse::<Rgb>() {
                Ok(parsed) => {
                    if parsed != rgb {
                        warnings.push(PaletteWarning::HexMismatch {
                            name: name.clone(),
                            hex: hex.clone(),
                            rgb,
                        });
                    }
                    parsed
                }
                Err(_) => {
                    warnings.push(PaletteWarning::InvalidHex {
                        name: name.clone(),
                        hex: hex.clone(),
                    });
                    rgb
                }
            };

            seen.insert(name.clone());
            entries.push(PaletteEntry {
                name,
                hex,
                rgb,
                swatch,
            });
        }

        (Self::new(id, entries), warnings)
    }

    /// The five-color palette substituted when a build is asked to match
    /// against an empty palette.
    pub fn fallback() -> Self {
        Self::new(
            "fallback",
            vec![
                PaletteEntry::new("Black", Rgb::new(5, 19, 29)),
                PaletteEntry::new("White", Rgb::WHITE),
                PaletteEntry::new("Red", Rgb::new(201, 26, 9)),
                PaletteEntry::new("Blue", Rgb::new(0, 85, 191)),
                PaletteEntry::new("Green", Rgb::new(35, 120, 65)),
            ],
        )
    }

    /// Palette identifier (e.g. `"square"`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Entries in scan order.
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the palette has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&PaletteEntry> {
        self.entries.get(idx)
    }

    /// Look up an entry by name (linear scan).
    pub fn find(&self, name: &str) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}
