use std::collections::HashSet;
use std::sync::Arc;

use mosaic_core::{ColorCounts, MosaicGrid, Palette};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};

use super::instructions::draw_instructions;
use super::preview::{draw_preview, PreviewStyle};
use super::text::{TextLayer, LABEL_FONT_FAMILY};
use crate::assets::AssetLoader;
use crate::error::RenderError;

/// Largest accepted cell size in pixels.
pub const MAX_CELL: u32 = 64;
/// Smallest cell that still fits a readable number.
pub const MIN_INSTRUCTION_CELL: u32 = 8;

/// Renders mosaic grids to pixmaps.
///
/// Fills are painted directly; numbers and legend text go through an SVG
/// overlay that uses the renderer's font database.
pub struct MosaicRenderer {
    /// Font database for text rendering
    fontdb: Arc<fontdb::Database>,
    /// Family that generic `sans-serif` resolves to, if any face is loaded
    label_family: Option<String>,
}

impl MosaicRenderer {
    /// Create a renderer with fonts loaded from the provided data
    pub fn with_fonts(fonts: Vec<(String, Vec<u8>)>) -> Self {
        let mut fontdb = fontdb::Database::new();

        for (name, data) in fonts {
            fontdb.load_font_data(data);
            tracing::debug!(font = %name, "Loaded font");
        }

        // Load system fonts as fallback
        fontdb.load_system_fonts();

        tracing::info!(
            font_count = fontdb.len(),
            "Loaded fonts for label rendering"
        );

        let families: HashSet<_> = fontdb
            .faces()
            .filter_map(|f| f.families.first().map(|(name, _)| name.clone()))
            .collect();
        tracing::debug!(families = ?families, "Available font families");

        let label_family = if families.contains(LABEL_FONT_FAMILY) {
            Some(LABEL_FONT_FAMILY.to_string())
        } else {
            let fallback = families.iter().min().cloned();
            tracing::warn!(
                wanted = LABEL_FONT_FAMILY,
                using = ?fallback,
                "Label font not available"
            );
            fallback
        };
        match &label_family {
            Some(family) => fontdb.set_sans_serif_family(family.as_str()),
            None => tracing::warn!("No fonts loaded, instruction sheets will have no labels"),
        }

        Self {
            fontdb: Arc::new(fontdb),
            label_family,
        }
    }

    /// Create a renderer with the fonts shipped in the binary plus system fonts
    pub fn new() -> Self {
        Self::with_fonts(AssetLoader::default().get_fonts())
    }

    /// Family used for labels, `None` when no font could be loaded
    pub fn label_family(&self) -> Option<&str> {
        self.label_family.as_deref()
    }

    /// Number of loaded font faces
    pub fn font_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Render the plain tiled preview.
    ///
    /// Returns `Ok(None)` when there is no grid to draw.
    pub fn render_preview(
        &self,
        grid: Option<&MosaicGrid>,
        cell: u32,
        style: PreviewStyle,
        outline: bool,
    ) -> Result<Option<Pixmap>, RenderError> {
        let Some(grid) = grid.filter(|g| !g.is_empty()) else {
            return Ok(None);
        };
        if cell == 0 || cell > MAX_CELL {
            return Err(RenderError::InvalidCellSize(cell));
        }
        draw_preview(grid, cell, style, outline).map(Some)
    }

    /// Render the numbered instruction sheet.
    ///
    /// Returns `Ok(None)` when there is no grid to draw. The legend panel
    /// is present only when both `counts` and `legend_palette` are given.
    pub fn render_instructions(
        &self,
        grid: Option<&MosaicGrid>,
        cell: u32,
        counts: Option<&ColorCounts>,
        legend_palette: Option<&Palette>,
    ) -> Result<Option<Pixmap>, RenderError> {
        let Some(grid) = grid.filter(|g| !g.is_empty()) else {
            return Ok(None);
        };
        if !(MIN_INSTRUCTION_CELL..=MAX_CELL).contains(&cell) {
            return Err(RenderError::InvalidCellSize(cell));
        }

        let (mut pixmap, text) = draw_instructions(grid, cell, counts, legend_palette)?;
        self.overlay_text(&mut pixmap, &text)?;
        Ok(Some(pixmap))
    }

    /// Rasterize a text layer on top of `pixmap`.
    fn overlay_text(&self, pixmap: &mut Pixmap, text: &TextLayer) -> Result<(), RenderError> {
        if text.is_empty() {
            return Ok(());
        }

        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&text.to_svg(), &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;
        resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
        Ok(())
    }
}

impl Default for MosaicRenderer {
    fn default() -> Self {
        Self::new()
    }
}
