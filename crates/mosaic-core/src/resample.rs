//! Down-sampling of source images to the mosaic grid.
//!
//! The resampling filter is chosen once, up front, by probing an ordered
//! list of candidate filters. The first candidate that produces a correctly
//! sized image from a small test pattern is used for every build. Nearest
//! neighbour is the floor of the chain and is always accepted.

use image::imageops::{self, FilterType};
use image::{Rgb as Pixel, RgbImage};
use serde::{Deserialize, Serialize};

use crate::mosaic::BuildError;

/// A resampling filter, best quality first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    /// Lanczos with window 3 (area-like, sharpest)
    Lanczos3,
    /// Catmull-Rom cubic
    CatmullRom,
    /// Bilinear
    Triangle,
    /// Nearest neighbour
    Nearest,
}

impl ResampleFilter {
    /// Default preference order.
    pub const PREFERENCE: [ResampleFilter; 4] = [
        ResampleFilter::Lanczos3,
        ResampleFilter::CatmullRom,
        ResampleFilter::Triangle,
        ResampleFilter::Nearest,
    ];

    fn filter_type(self) -> FilterType {
        match self {
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::Nearest => FilterType::Nearest,
        }
    }

    /// Lowercase name as used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            ResampleFilter::Lanczos3 => "lanczos3",
            ResampleFilter::CatmullRom => "catmull-rom",
            ResampleFilter::Triangle => "triangle",
            ResampleFilter::Nearest => "nearest",
        }
    }
}

/// Resizes images to a square grid with a probed filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resampler {
    filter: ResampleFilter,
}

impl Resampler {
    /// Use `filter` without probing.
    pub fn with_filter(filter: ResampleFilter) -> Self {
        Self { filter }
    }

    /// Pick the first candidate that passes a trial resize.
    ///
    /// Falls back to nearest neighbour when no candidate passes or the
    /// list is empty, so a resampler is always available.
    pub fn probe(candidates: &[ResampleFilter]) -> Self {
        for &filter in candidates {
            if Self::trial(filter) {
                tracing::debug!(filter = filter.name(), "Selected resample filter");
                return Self { filter };
            }
            tracing::debug!(filter = filter.name(), "Resample filter failed probe");
        }

        tracing::warn!("No resample filter passed the probe, using nearest neighbour");
        Self {
            filter: ResampleFilter::Nearest,
        }
    }

    fn trial(filter: ResampleFilter) -> bool {
        let pattern = RgbImage::from_fn(8, 8, |x, y| {
            if (x + y) % 2 == 0 {
                Pixel([0, 0, 0])
            } else {
                Pixel([255, 255, 255])
            }
        });
        let out = imageops::resize(&pattern, 3, 3, filter.filter_type());
        out.dimensions() == (3, 3) && out.as_raw().len() == 3 * 3 * 3
    }

    /// The filter in use.
    pub fn filter(&self) -> ResampleFilter {
        self.filter
    }

    /// Resize `image` to exactly `size × size`.
    ///
    /// Non-square sources are squashed; aspect ratio is not preserved.
    pub fn resample(&self, image: &RgbImage, size: u32) -> Result<RgbImage, BuildError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(BuildError::EmptyImage);
        }

        let resized = imageops::resize(image, size, size, self.filter.filter_type());
        if resized.dimensions() != (size, size) {
            return Err(BuildError::Resample(format!(
                "{} produced {}x{}, expected {size}x{size}",
                self.filter.name(),
                resized.width(),
                resized.height()
            )));
        }
        Ok(resized)
    }
}

impl Default for Resampler {
    fn default() -> Self {
        Self::probe(&ResampleFilter::PREFERENCE)
    }
}
