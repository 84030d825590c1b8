//! Supported baseplate sizes.

use std::fmt;

use serde::Serialize;

use super::error::BuildError;

/// A supported mosaic dimension N (the grid is N×N studs).
///
/// Only the fixed set of baseplate sizes can be constructed, so a grid can
/// never be requested at an arbitrary size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u32")]
pub struct BaseplateSize(u32);

impl BaseplateSize {
    /// 16×16 studs
    pub const S16: Self = Self(16);
    /// 32×32 studs (standard baseplate)
    pub const S32: Self = Self(32);
    /// 48×48 studs (standard baseplate)
    pub const S48: Self = Self(48);
    /// 64×64 studs
    pub const S64: Self = Self(64);
    /// 96×96 studs
    pub const S96: Self = Self(96);
    /// 128×128 studs
    pub const S128: Self = Self(128);

    /// Every supported size, smallest first.
    pub const ALL: [Self; 6] = [
        Self::S16,
        Self::S32,
        Self::S48,
        Self::S64,
        Self::S96,
        Self::S128,
    ];

    /// Validate a requested dimension.
    pub fn new(n: u32) -> Result<Self, BuildError> {
        Self::ALL
            .into_iter()
            .find(|s| s.0 == n)
            .ok_or(BuildError::UnsupportedSize(n))
    }

    /// Grid dimension N.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of cells, N*N.
    #[inline]
    pub fn cell_count(self) -> usize {
        (self.0 as usize) * (self.0 as usize)
    }

    /// Display label such as `"32×32"`.
    pub fn label(self) -> String {
        format!("{0}×{0}", self.0)
    }

    /// Whether this size matches a standard baseplate.
    pub fn is_standard(self) -> bool {
        matches!(self, Self::S32 | Self::S48)
    }
}

impl TryFrom<u32> for BaseplateSize {
    type Error = BuildError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<BaseplateSize> for u32 {
    fn from(size: BaseplateSize) -> Self {
        size.0
    }
}

impl fmt::Display for BaseplateSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
