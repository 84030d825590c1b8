//! Plain tiled preview of a mosaic grid.

use mosaic_core::{MosaicGrid, Rgb};
use resvg::tiny_skia::Pixmap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::canvas::{fill_circle, fill_rect, new_pixmap};
use crate::error::RenderError;

/// Baseplate color behind round studs.
const BASEPLATE: Rgb = Rgb::new(42, 42, 42);

/// How preview cells are drawn.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PreviewStyle {
    /// Each cell is a filled square, no gaps
    #[default]
    Square,
    /// Each cell is a round stud on a dark baseplate
    Round,
}

/// Darken a color for cell outlines.
fn shade(color: Rgb) -> Rgb {
    let f = |c: u8| (c as u16 * 3 / 5) as u8;
    Rgb::new(f(color.r), f(color.g), f(color.b))
}

/// Draw `grid` at `cell` pixels per stud.
///
/// The output is exactly `N*cell` pixels square. Square cells are filled
/// with the palette swatch color on exact pixel boundaries; with `outline`
/// each cell gets a 1px darker border on its top and left edge.
pub(crate) fn draw_preview(
    grid: &MosaicGrid,
    cell: u32,
    style: PreviewStyle,
    outline: bool,
) -> Result<Pixmap, RenderError> {
    let side = grid.dimension() * cell;

    match style {
        PreviewStyle::Square => {
            let mut pixmap = new_pixmap(side, side, Rgb::WHITE)?;
            for (x, y, entry) in grid.cells() {
                let (px, py) = (x * cell, y * cell);
                if outline && cell > 2 {
                    fill_rect(&mut pixmap, px, py, cell, cell, shade(entry.swatch));
                    fill_rect(&mut pixmap, px + 1, py + 1, cell - 1, cell - 1, entry.swatch);
                } else {
                    fill_rect(&mut pixmap, px, py, cell, cell, entry.swatch);
                }
            }
            Ok(pixmap)
        }
        PreviewStyle::Round => {
            let mut pixmap = new_pixmap(side, side, BASEPLATE)?;
            let radius = cell as f32 * 0.45;
            for (x, y, entry) in grid.cells() {
                let cx = (x * cell) as f32 + cell as f32 / 2.0;
                let cy = (y * cell) as f32 + cell as f32 / 2.0;
                fill_circle(&mut pixmap, cx, cy, radius, entry.swatch);
            }
            Ok(pixmap)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::canvas::pixel_rgb;
    use mosaic_core::{BaseplateSize, Palette};
    use std::sync::Arc;

    fn checker_grid() -> MosaicGrid {
        let cells = (0..256).map(|i| (i % 16 + i / 16) % 5).collect();
        MosaicGrid::from_indices(BaseplateSize::S16, Arc::new(Palette::fallback()), cells)
            .unwrap()
    }

    #[test]
    fn test_square_preview_roundtrip() {
        let grid = checker_grid();
        let cell = 7;
        let pixmap = draw_preview(&grid, cell, PreviewStyle::Square, false).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (16 * 7, 16 * 7));

        // Every pixel of every block carries the cell's swatch color
        for (x, y, entry) in grid.cells() {
            for dy in 0..cell {
                for dx in 0..cell {
                    assert_eq!(
                        pixel_rgb(&pixmap, x * cell + dx, y * cell + dy),
                        Some(entry.swatch)
                    );
                }
            }
        }
    }

    #[test]
    fn test_outline_keeps_interior() {
        let grid = checker_grid();
        let pixmap = draw_preview(&grid, 10, PreviewStyle::Square, true).unwrap();
        let entry = grid.entry(3, 4).unwrap();
        assert_eq!(pixel_rgb(&pixmap, 35, 45), Some(entry.swatch));
        assert_eq!(pixel_rgb(&pixmap, 30, 45), Some(shade(entry.swatch)));
    }

    #[test]
    fn test_round_preview_has_baseplate_corners() {
        let grid = checker_grid();
        let pixmap = draw_preview(&grid, 20, PreviewStyle::Round, false).unwrap();
        assert_eq!(pixmap.width(), 320);
        // Corner of a cell lies outside the stud
        assert_eq!(pixel_rgb(&pixmap, 0, 0), Some(BASEPLATE));
        // Center of a cell lies inside the stud
        let entry = grid.entry(2, 5).unwrap();
        assert_eq!(pixel_rgb(&pixmap, 50, 110), Some(entry.swatch));
    }

    #[test]
    fn test_preview_style_serde_names() {
        let style: PreviewStyle = serde_json::from_str("\"round\"").unwrap();
        assert_eq!(style, PreviewStyle::Round);
        assert_eq!(
            serde_json::to_string(&PreviewStyle::Square).unwrap(),
            "\"square\""
        );
    }
}
