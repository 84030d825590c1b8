//! Numbered instruction sheet with a color legend.
//!
//! Layout of the legend panel below the grid:
//! - header "Color Legend:" at `(10, grid_h + 10)`
//! - four entries per row, each column `width / 4` wide
//! - entry `i` at `x = col * col_width + 10`, `y = grid_h + 35 + row * 25`
//! - a 16×16 outlined swatch with the legend number, then "name (count)"
//!
//! The panel is `rows * 25 + 40` pixels high.

use mosaic_core::{ColorCounts, MosaicGrid, Palette, Rgb};
use resvg::tiny_skia::Pixmap;

use super::canvas::{new_pixmap, outlined_rect};
use super::text::{Anchor, TextLayer};
use crate::error::RenderError;

pub const LEGEND_COLUMNS: usize = 4;
pub const LEGEND_ROW_HEIGHT: u32 = 25;
pub const LEGEND_PADDING: u32 = 40;
const LEGEND_SWATCH: u32 = 16;
const LEGEND_FONT_SIZE: f32 = 12.0;

/// One legend line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendItem {
    /// 1-based number, matching the cell labels
    pub number: usize,
    pub name: String,
    pub count: usize,
    pub swatch: Rgb,
}

/// Legend entries for `counts`, in first-seen order.
///
/// Names missing from `palette` are skipped and logged; numbering of the
/// remaining entries is unchanged.
pub fn legend_items(counts: &ColorCounts, palette: &Palette) -> Vec<LegendItem> {
    counts
        .iter()
        .enumerate()
        .filter_map(|(i, (name, count))| match palette.find(name) {
            Some(entry) => Some(LegendItem {
                number: i + 1,
                name: name.to_string(),
                count,
                swatch: entry.swatch,
            }),
            None => {
                tracing::warn!(
                    color = name,
                    palette = palette.id(),
                    "Color not in legend palette, skipped"
                );
                None
            }
        })
        .collect()
}

/// Height of the legend panel for `colors` distinct colors.
pub fn legend_height(colors: usize) -> u32 {
    if colors == 0 {
        return 0;
    }
    let rows = colors.div_ceil(LEGEND_COLUMNS) as u32;
    rows * LEGEND_ROW_HEIGHT + LEGEND_PADDING
}

fn label_color(background: Rgb) -> Rgb {
    if background.prefers_dark_text() {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

/// Paint the instruction sheet and collect its text.
///
/// Cell numbers come from `counts` when given, otherwise from the grid's
/// own first-seen order. The legend is drawn only with both `counts` and
/// `legend_palette`.
pub(crate) fn draw_instructions(
    grid: &MosaicGrid,
    cell: u32,
    counts: Option<&ColorCounts>,
    legend_palette: Option<&Palette>,
) -> Result<(Pixmap, TextLayer), RenderError> {
    let grid_px = grid.dimension() * cell;

    let numbering = match counts {
        Some(counts) => counts.clone(),
        None => grid.cells().map(|(_, _, e)| e.name.as_str()).collect(),
    };
    let legend = match (counts, legend_palette) {
        (Some(counts), Some(palette)) if !counts.is_empty() => {
            Some((legend_items(counts, palette), legend_height(counts.len())))
        }
        _ => None,
    };
    let panel_height = legend.as_ref().map_or(0, |(_, h)| *h);

    let mut pixmap = new_pixmap(grid_px, grid_px + panel_height, Rgb::WHITE)?;
    let mut text = TextLayer::new(grid_px, grid_px + panel_height);

    let font_size = cell as f32 * 0.45;
    for (x, y, entry) in grid.cells() {
        let (px, py) = (x * cell, y * cell);
        outlined_rect(&mut pixmap, px, py, cell, cell, entry.swatch, Rgb::BLACK);

        if let Some(number) = numbering.number_of(&entry.name) {
            text.text(
                px as f32 + cell as f32 / 2.0,
                py as f32 + cell as f32 / 2.0,
                font_size,
                label_color(entry.swatch),
                Anchor::Center,
                &number.to_string(),
            );
        }
    }

    if let Some((items, _)) = legend {
        text.text(
            10.0,
            (grid_px + 10) as f32,
            LEGEND_FONT_SIZE,
            Rgb::BLACK,
            Anchor::TopLeft,
            "Color Legend:",
        );

        let col_width = grid_px / LEGEND_COLUMNS as u32;
        for (i, item) in items.iter().enumerate() {
            let col = (i % LEGEND_COLUMNS) as u32;
            let row = (i / LEGEND_COLUMNS) as u32;
            let x = col * col_width + 10;
            let y = grid_px + 35 + row * LEGEND_ROW_HEIGHT;

            outlined_rect(
                &mut pixmap,
                x,
                y,
                LEGEND_SWATCH,
                LEGEND_SWATCH,
                item.swatch,
                Rgb::BLACK,
            );
            text.text(
                (x + LEGEND_SWATCH / 2) as f32,
                (y + LEGEND_SWATCH / 2) as f32,
                9.0,
                label_color(item.swatch),
                Anchor::Center,
                &item.number.to_string(),
            );
            text.text(
                (x + 20) as f32,
                (y + 2) as f32,
                LEGEND_FONT_SIZE,
                Rgb::BLACK,
                Anchor::TopLeft,
                &format!("{} ({})", item.name, item.count),
            );
        }
    }

    Ok((pixmap, text))
}
