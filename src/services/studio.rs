//! Explicit application state for one mosaic session.
//!
//! A [`Studio`] owns the current source image, the chosen palette and size,
//! and the last generated mosaic. Every core call receives these as
//! arguments; nothing is read from ambient state.

use std::sync::Arc;

use image::DynamicImage;
use mosaic_core::{
    build_manifest, demo_image, BaseplateSize, BuildError, Manifest, Mosaic, MosaicBuilder,
    PaletteError,
};
use thiserror::Error;

use crate::error::RenderError;
use crate::rendering::{encode_png, MosaicRenderer, PreviewStyle};
use crate::services::PaletteStore;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("No image loaded")]
    NoImage,

    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub struct Studio {
    store: Arc<PaletteStore>,
    builder: Arc<MosaicBuilder>,
    renderer: Arc<MosaicRenderer>,
    image: Option<DynamicImage>,
    palette_id: String,
    size: BaseplateSize,
    mosaic: Option<Mosaic>,
}

impl Studio {
    /// Start with the store's default palette and a 32×32 grid.
    pub fn new(
        store: Arc<PaletteStore>,
        builder: Arc<MosaicBuilder>,
        renderer: Arc<MosaicRenderer>,
    ) -> Self {
        let palette_id = store.default_id().to_string();
        Self {
            store,
            builder,
            renderer,
            image: None,
            palette_id,
            size: BaseplateSize::S32,
            mosaic: None,
        }
    }

    pub fn load_image(&mut self, image: DynamicImage) {
        self.image = Some(image);
        self.mosaic = None;
    }

    /// Decode and load an encoded image.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<(), StudioError> {
        let image = image::load_from_memory(bytes).map_err(BuildError::from)?;
        self.load_image(image);
        Ok(())
    }

    /// Load the built-in gradient.
    pub fn load_demo(&mut self) {
        self.load_image(demo_image());
    }

    /// Choose a palette. A previously generated mosaic is discarded.
    pub fn select_palette(&mut self, id: &str) -> Result<(), StudioError> {
        self.store.get(id)?;
        if self.palette_id != id {
            self.palette_id = id.to_string();
            self.mosaic = None;
        }
        Ok(())
    }

    /// Choose a grid size. A previously generated mosaic is discarded.
    pub fn select_size(&mut self, n: u32) -> Result<(), StudioError> {
        let size = BaseplateSize::new(n)?;
        if self.size != size {
            self.size = size;
            self.mosaic = None;
        }
        Ok(())
    }

    pub fn palette_id(&self) -> &str {
        &self.palette_id
    }

    pub fn size(&self) -> BaseplateSize {
        self.size
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn mosaic(&self) -> Option<&Mosaic> {
        self.mosaic.as_ref()
    }

    /// Build a mosaic from the current image, palette and size.
    ///
    /// On failure the previous mosaic is kept.
    pub fn generate(&mut self) -> Result<&Mosaic, StudioError> {
        let image = self.image.as_ref().ok_or(StudioError::NoImage)?;
        let palette = self.store.palette(&self.palette_id)?;
        let mosaic = self.builder.build_sized(image, self.size, palette)?;

        tracing::info!(
            palette = %self.palette_id,
            size = %self.size,
            colors = mosaic.counts.len(),
            "Generated mosaic"
        );
        Ok(self.mosaic.insert(mosaic))
    }

    /// Forget the image and mosaic; keep palette and size choices.
    pub fn reset(&mut self) {
        self.image = None;
        self.mosaic = None;
    }

    /// Preview PNG of the current mosaic, `None` if nothing was generated.
    ///
    /// Without an explicit style the palette's configured style is used.
    pub fn preview_png(
        &self,
        cell: u32,
        style: Option<PreviewStyle>,
        outline: bool,
    ) -> Result<Option<Vec<u8>>, StudioError> {
        let style = match style {
            Some(style) => style,
            None => self.store.get(&self.palette_id)?.preview_style,
        };
        let grid = self.mosaic.as_ref().map(|m| &m.grid);
        self.renderer
            .render_preview(grid, cell, style, outline)?
            .map(|pixmap| encode_png(&pixmap))
            .transpose()
            .map_err(StudioError::from)
    }

    /// Instruction sheet PNG of the current mosaic, `None` if nothing was
    /// generated.
    pub fn instructions_png(&self, cell: u32) -> Result<Option<Vec<u8>>, StudioError> {
        let Some(mosaic) = self.mosaic.as_ref() else {
            return Ok(None);
        };
        self.renderer
            .render_instructions(
                Some(&mosaic.grid),
                cell,
                Some(&mosaic.counts),
                Some(mosaic.palette()),
            )?
            .map(|pixmap| encode_png(&pixmap))
            .transpose()
            .map_err(StudioError::from)
    }

    /// Shopping list of the current mosaic.
    pub fn shopping_list(&self) -> Option<Manifest> {
        self.mosaic
            .as_ref()
            .map(|m| build_manifest(&m.counts, m.palette()))
    }
}
