#![allow(clippy::module_inception)]

//! mosaic-core: palette quantization for tile mosaics
//!
//! This library turns an arbitrary raster image into an N×N grid of colors
//! drawn from a fixed palette of physical 1×1 tiles, counts how many tiles
//! of each color the grid uses, and derives a sorted shopping list.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use image::{DynamicImage, Rgb, RgbImage};
//! use mosaic_core::{build_manifest, MosaicBuilder, Palette};
//!
//! let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([201, 26, 9])));
//! let palette = Arc::new(Palette::fallback());
//!
//! let mosaic = MosaicBuilder::new().build(&image, 32, palette).unwrap();
//! let manifest = build_manifest(&mosaic.counts, mosaic.palette());
//!
//! assert_eq!(manifest.entries.len(), 1);
//! assert_eq!(manifest.entries[0].name, "Red");
//! assert_eq!(manifest.total(), 32 * 32);
//! ```
//!
//! # Pipeline
//!
//! 1. The image is converted to RGB. Alpha is composited over white.
//! 2. It is resampled to exactly `size × size` with the filter chosen by the
//!    startup probe in [`resample`]. Non-square images are squashed.
//! 3. Every resampled pixel is matched to its nearest palette entry by
//!    Euclidean distance in RGB ([`matcher`]).
//! 4. Counts are accumulated in row-major first-seen order, which also
//!    defines the legend numbering used on instruction sheets.
//!
//! # Failure Policy
//!
//! Builds either produce a complete grid or return a [`BuildError`]. Bad
//! pixels never abort a build, they are matched as black. An empty palette
//! is replaced by [`Palette::fallback`] and reported as a
//! [`BuildWarning`].

pub mod demo;
pub mod manifest;
pub mod matcher;
pub mod mosaic;
pub mod palette;
pub mod resample;

#[cfg(test)]
mod domain_tests;

pub use demo::demo_image;
pub use manifest::{build_manifest, Manifest, ShoppingEntry};
pub use mosaic::{
    BaseplateSize, BuildError, BuildWarning, ColorCounts, Mosaic, MosaicBuilder, MosaicGrid,
};
pub use palette::{
    Palette, PaletteEntry, PaletteError, PaletteRecord, PaletteWarning, ParseColorError, Rgb,
};
pub use resample::{ResampleFilter, Resampler};
