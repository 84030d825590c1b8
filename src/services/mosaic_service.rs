use std::sync::Arc;

use axum::body::Bytes;
use mosaic_core::{build_manifest, Manifest, Mosaic, MosaicBuilder};

use crate::error::ApiError;
use crate::rendering::{encode_png, MosaicRenderer, PreviewStyle};
use crate::services::{PaletteStore, StoredPalette};

/// Stateless build/render service for HTTP requests
///
/// Every call decodes and builds its own mosaic. CPU-heavy work runs on
/// the blocking thread pool.
pub struct MosaicService {
    store: Arc<PaletteStore>,
    builder: Arc<MosaicBuilder>,
    renderer: Arc<MosaicRenderer>,
}

impl MosaicService {
    pub fn new(
        store: Arc<PaletteStore>,
        builder: Arc<MosaicBuilder>,
        renderer: Arc<MosaicRenderer>,
    ) -> Self {
        Self {
            store,
            builder,
            renderer,
        }
    }

    pub fn store(&self) -> &PaletteStore {
        &self.store
    }

    /// Look up a palette, defaulting when `id` is `None`
    pub fn resolve_palette(&self, id: Option<&str>) -> Result<&StoredPalette, ApiError> {
        Ok(self.store.resolve(id)?)
    }

    /// Decode `bytes` and build a mosaic
    pub async fn build(
        &self,
        bytes: Bytes,
        palette: Option<&str>,
        size: u32,
    ) -> Result<Mosaic, ApiError> {
        if bytes.is_empty() {
            return Err(ApiError::BadRequest("request body is empty".to_string()));
        }
        let palette = self.resolve_palette(palette)?.palette.clone();
        let builder = self.builder.clone();

        let mosaic = tokio::task::spawn_blocking(move || {
            builder.build_from_bytes(&bytes, size, palette)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Build task failed: {e}")))??;

        for warning in &mosaic.warnings {
            tracing::warn!(%warning, "Mosaic built with warning");
        }
        Ok(mosaic)
    }

    /// Render a preview PNG for a built mosaic
    pub async fn preview_png(
        &self,
        mosaic: Mosaic,
        cell: u32,
        style: PreviewStyle,
        outline: bool,
    ) -> Result<Vec<u8>, ApiError> {
        let renderer = self.renderer.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ApiError> {
            let pixmap = renderer
                .render_preview(Some(&mosaic.grid), cell, style, outline)?
                .ok_or(ApiError::NothingToRender)?;
            Ok(encode_png(&pixmap)?)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Render task failed: {e}")))?
    }

    /// Render the instruction sheet PNG for a built mosaic
    pub async fn instructions_png(&self, mosaic: Mosaic, cell: u32) -> Result<Vec<u8>, ApiError> {
        let renderer = self.renderer.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ApiError> {
            let pixmap = renderer
                .render_instructions(
                    Some(&mosaic.grid),
                    cell,
                    Some(&mosaic.counts),
                    Some(mosaic.palette()),
                )?
                .ok_or(ApiError::NothingToRender)?;
            Ok(encode_png(&pixmap)?)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Render task failed: {e}")))?
    }

    pub fn shopping_list(&self, mosaic: &Mosaic) -> Manifest {
        build_manifest(&mosaic.counts, mosaic.palette())
    }
}
