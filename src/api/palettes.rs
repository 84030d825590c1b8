use axum::{extract::State, response::Json};
use mosaic_core::BaseplateSize;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::models::AppConfig;
use crate::rendering::PreviewStyle;
use crate::services::MosaicService;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaletteInfo {
    pub id: String,
    pub label: String,
    /// Number of colors in the palette
    pub colors: usize,
    pub preview_style: PreviewStyle,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SizeInfo {
    pub size: u32,
    pub label: String,
    /// Standard baseplate size (32 or 48)
    pub standard: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CellBounds {
    pub default: u32,
    pub min: u32,
    pub max: u32,
}

/// Available palettes, grid sizes and preview bounds
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PalettesResponse {
    pub default_palette: String,
    pub palettes: Vec<PaletteInfo>,
    pub sizes: Vec<SizeInfo>,
    pub preview_cell: CellBounds,
    pub instructions_cell: CellBounds,
}

/// List palettes and grid sizes
#[utoipa::path(
    get,
    path = "/api/palettes",
    responses(
        (status = 200, description = "Available palettes and sizes", body = PalettesResponse),
    ),
    tag = "Palettes"
)]
pub async fn handle_palettes(
    State(service): State<Arc<MosaicService>>,
    State(config): State<Arc<AppConfig>>,
) -> Json<PalettesResponse> {
    let store = service.store();
    let palettes = store
        .iter()
        .map(|(id, stored)| PaletteInfo {
            id: id.to_string(),
            label: stored.label.clone(),
            colors: stored.palette.len(),
            preview_style: stored.preview_style,
        })
        .collect();

    let sizes = BaseplateSize::ALL
        .iter()
        .map(|size| SizeInfo {
            size: size.get(),
            label: size.label(),
            standard: size.is_standard(),
        })
        .collect();

    Json(PalettesResponse {
        default_palette: store.default_id().to_string(),
        palettes,
        sizes,
        preview_cell: CellBounds {
            default: config.preview.default_cell,
            min: config.preview.min_cell,
            max: config.preview.max_cell,
        },
        instructions_cell: CellBounds {
            default: config.instructions.cell,
            min: config.instructions.min_cell,
            max: config.instructions.max_cell,
        },
    })
}
