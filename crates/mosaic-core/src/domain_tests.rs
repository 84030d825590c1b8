//! End-to-end regression tests for the quantization pipeline.
//!
//! Each test documents the behavior it guards.

#[cfg(test)]
mod domain_tests {
    use std::sync::Arc;

    use image::{DynamicImage, Rgb as Pixel, RgbImage};
    use pretty_assertions::assert_eq;

    use crate::demo::demo_image;
    use crate::manifest::build_manifest;
    use crate::matcher;
    use crate::mosaic::{BaseplateSize, BuildError, MosaicBuilder};
    use crate::palette::{Palette, PaletteEntry, Rgb};
    use crate::resample::{ResampleFilter, Resampler};

    fn palette_with_red() -> Arc<Palette> {
        Arc::new(Palette::new(
            "test",
            vec![
                PaletteEntry::new("Black", Rgb::new(5, 19, 29)),
                PaletteEntry::new("White", Rgb::WHITE),
                PaletteEntry::new("Red", Rgb::new(255, 0, 0)),
                PaletteEntry::new("Speckle Black-Copper", Rgb::new(5, 19, 29)),
            ],
        ))
    }

    /// If this breaks, a uniform image no longer maps to a single color:
    /// either resampling introduces edge ringing or the matcher drifted.
    #[test]
    fn test_pure_red_64_single_row_manifest() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Pixel([255, 0, 0])));
        let mosaic = MosaicBuilder::new()
            .build(&image, 64, palette_with_red())
            .unwrap();

        assert_eq!(mosaic.counts.len(), 1);
        assert_eq!(mosaic.counts.get("Red"), Some(4096));

        let manifest = build_manifest(&mosaic.counts, mosaic.palette());
        let rows: Vec<_> = manifest
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.quantity))
            .collect();
        assert_eq!(rows, vec![("Red", 4096)]);
    }

    /// If this breaks, matching against an empty palette panics or returns
    /// something other than the documented fallback black.
    #[test]
    fn test_nearest_with_empty_palette() {
        let entry = matcher::nearest(10.0, 10.0, 10.0, &[]);
        assert_eq!(entry.name, "Black");
        assert_eq!(entry.hex, "#05131D");
    }

    /// If this breaks, an arbitrary size slipped through validation and the
    /// builder would allocate a huge grid.
    #[test]
    fn test_size_999_rejected_up_front() {
        let result = MosaicBuilder::new().build(&demo_image(), 999, palette_with_red());
        assert!(matches!(result, Err(BuildError::UnsupportedSize(999))));
    }

    /// If this breaks, duplicate RGB values resolve to a later entry and
    /// names in counts become unstable across palettes.
    #[test]
    fn test_exact_entries_match_earliest_duplicate() {
        let palette = palette_with_red();
        for entry in palette.entries() {
            let (idx, found) = matcher::find_nearest(entry.rgb, palette.entries());
            assert_eq!(found.rgb.distance(entry.rgb), 0.0);
            let first = palette
                .entries()
                .iter()
                .position(|e| e.rgb == entry.rgb)
                .unwrap();
            assert_eq!(idx, Some(first));
        }
    }

    /// If this breaks, some size produces the wrong number of cells or the
    /// counts lose cells.
    #[test]
    fn test_every_size_counts_sum_to_cells() {
        let builder = MosaicBuilder::new();
        let palette = Arc::new(Palette::fallback());
        let image = demo_image();
        for size in BaseplateSize::ALL {
            let mosaic = builder.build(&image, size.get(), palette.clone()).unwrap();
            assert_eq!(mosaic.grid.len(), size.cell_count());
            assert_eq!(mosaic.counts.total(), size.cell_count());

            let manifest = build_manifest(&mosaic.counts, mosaic.palette());
            assert_eq!(manifest.total(), size.cell_count());
            assert!(manifest
                .entries
                .windows(2)
                .all(|w| w[0].quantity >= w[1].quantity));
        }
    }

    /// If this breaks, legend numbers have gaps or repeats, or no longer
    /// follow the row-major first-seen order of the grid.
    #[test]
    fn test_legend_numbering_gapless_first_seen() {
        let mosaic = MosaicBuilder::with_resampler(Resampler::with_filter(ResampleFilter::Nearest))
            .build(&demo_image(), 32, Arc::new(Palette::fallback()))
            .unwrap();

        let mut expected = Vec::new();
        for (_, _, entry) in mosaic.grid.cells() {
            if !expected.contains(&entry.name.as_str()) {
                expected.push(entry.name.as_str());
            }
        }
        let actual: Vec<_> = mosaic.counts.iter().map(|(name, _)| name).collect();
        assert_eq!(actual, expected);

        let numbers: Vec<_> = actual
            .iter()
            .map(|name| mosaic.counts.number_of(name).unwrap())
            .collect();
        assert_eq!(numbers, (1..=actual.len()).collect::<Vec<_>>());
    }

    /// If this breaks, greyscale or alpha inputs are no longer normalized to
    /// RGB before matching.
    #[test]
    fn test_greyscale_input_is_expanded() {
        let image = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
            40,
            40,
            image::Luma([255]),
        ));
        let mosaic = MosaicBuilder::new()
            .build(&image, 16, Arc::new(Palette::fallback()))
            .unwrap();
        assert_eq!(mosaic.counts.get("White"), Some(256));
    }
}
