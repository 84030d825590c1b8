//! MosaicBuilder: the image → grid pipeline.

use std::sync::Arc;

use image::{DynamicImage, RgbImage, RgbaImage};

use super::counts::ColorCounts;
use super::error::{BuildError, BuildWarning};
use super::grid::MosaicGrid;
use super::size::BaseplateSize;
use crate::matcher;
use crate::palette::{Palette, Rgb};
use crate::resample::Resampler;

/// The result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mosaic {
    /// The quantized grid
    pub grid: MosaicGrid,
    /// Cell counts per color, first-seen order
    pub counts: ColorCounts,
    /// Tolerated problems met during the build
    pub warnings: Vec<BuildWarning>,
}

impl Mosaic {
    /// Palette the grid was matched against. This is the fallback palette
    /// when a [`BuildWarning::FallbackPalette`] was raised.
    pub fn palette(&self) -> &Arc<Palette> {
        self.grid.palette()
    }

    /// Grid size.
    pub fn size(&self) -> BaseplateSize {
        self.grid.size()
    }
}

/// Converts images into palette-quantized grids.
///
/// A builder holds the resampling filter chosen at startup and is reused
/// for every build; it has no per-build state.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use image::{DynamicImage, Rgb, RgbImage};
/// use mosaic_core::{MosaicBuilder, Palette};
///
/// let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 50, Rgb([250, 250, 250])));
/// let mosaic = MosaicBuilder::new()
///     .build(&image, 16, Arc::new(Palette::fallback()))
///     .unwrap();
///
/// assert_eq!(mosaic.counts.get("White"), Some(256));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MosaicBuilder {
    resampler: Resampler,
}

impl MosaicBuilder {
    /// Create a builder with a probed resampler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit resampler.
    pub fn with_resampler(resampler: Resampler) -> Self {
        Self { resampler }
    }

    /// Decode `bytes` and build a mosaic.
    pub fn build_from_bytes(
        &self,
        bytes: &[u8],
        size: u32,
        palette: Arc<Palette>,
    ) -> Result<Mosaic, BuildError> {
        let size = BaseplateSize::new(size)?;
        let image = image::load_from_memory(bytes)?;
        self.build_sized(&image, size, palette)
    }

    /// Build a mosaic of `size × size` cells from `image`.
    ///
    /// The size is validated before any image work. Transparent pixels are
    /// composited over white. An empty palette is replaced by
    /// [`Palette::fallback`] and reported in [`Mosaic::warnings`].
    pub fn build(
        &self,
        image: &DynamicImage,
        size: u32,
        palette: Arc<Palette>,
    ) -> Result<Mosaic, BuildError> {
        let size = BaseplateSize::new(size)?;
        self.build_sized(image, size, palette)
    }

    /// Build with an already validated size.
    pub fn build_sized(
        &self,
        image: &DynamicImage,
        size: BaseplateSize,
        palette: Arc<Palette>,
    ) -> Result<Mosaic, BuildError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(BuildError::EmptyImage);
        }

        let mut warnings = Vec::new();
        let palette = if palette.is_empty() {
            tracing::warn!(
                palette = palette.id(),
                "Palette has no colors, using fallback palette"
            );
            warnings.push(BuildWarning::FallbackPalette {
                requested: palette.id().to_string(),
            });
            Arc::new(Palette::fallback())
        } else {
            palette
        };

        let rgb = flatten(image);
        let resized = self.resampler.resample(&rgb, size.get())?;

        let n = size.get();
        let entries = palette.entries();
        let mut cells = Vec::with_capacity(size.cell_count());
        let mut counts = ColorCounts::new();
        // Palette index -> position in `counts`
        let mut seen: Vec<Option<usize>> = vec![None; entries.len()];

        for y in 0..n {
            for x in 0..n {
                let color = resized
                    .get_pixel_checked(x, y)
                    .map(|p| Rgb::from(p.0))
                    .unwrap_or(Rgb::BLACK);
                let idx = match matcher::find_nearest(color, entries) {
                    (Some(idx), _) => idx,
                    // Unreachable with a non-empty palette
                    (None, _) => 0,
                };
                cells.push(idx);

                match seen[idx] {
                    Some(pos) => counts.increment_at(pos),
                    None => seen[idx] = Some(counts.push_new(&entries[idx].name)),
                }
            }
        }

        tracing::debug!(
            size = n,
            palette = palette.id(),
            colors = counts.len(),
            filter = self.resampler.filter().name(),
            "Built mosaic"
        );

        let grid = MosaicGrid::from_indices(size, palette, cells).ok_or_else(|| {
            BuildError::Resample("grid does not match requested size".to_string())
        })?;

        Ok(Mosaic {
            grid,
            counts,
            warnings,
        })
    }
}

/// Drop alpha by compositing over white.
fn flatten(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }
    composite_over_white(&image.to_rgba8())
}

fn composite_over_white(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let blend = |c: u8| -> u8 {
            match a {
                255 => c,
                0 => 255,
                _ => {
                    let af = a as u16;
                    ((c as u16 * af + 255 * (255 - af)) / 255) as u8
                }
            }
        };
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}
