use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use base64::Engine;
use mosaic_core::{BaseplateSize, Mosaic};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::models::AppConfig;
use crate::rendering::{legend_items, PreviewStyle};
use crate::services::MosaicService;

fn default_size() -> u32 {
    BaseplateSize::S32.get()
}

/// Query parameters shared by all mosaic endpoints
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MosaicQuery {
    /// Palette id (default: configured default palette)
    pub palette: Option<String>,
    /// Grid size: 16, 32, 48, 64, 96 or 128
    #[serde(default = "default_size")]
    #[param(default = 32)]
    pub size: u32,
    /// Include a base64 PNG preview data URL in the JSON response
    #[serde(default)]
    pub include_preview: bool,
}

/// Query parameters for the preview endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PreviewQuery {
    pub palette: Option<String>,
    #[serde(default = "default_size")]
    #[param(default = 32)]
    pub size: u32,
    /// Pixels per stud (within the configured preview bounds)
    pub cell: Option<u32>,
    /// Square tiles or round studs (default: the palette's style)
    pub style: Option<PreviewStyle>,
    /// Outline each cell (default: configured)
    pub outline: Option<bool>,
}

/// Query parameters for the instructions endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InstructionsQuery {
    pub palette: Option<String>,
    #[serde(default = "default_size")]
    #[param(default = 32)]
    pub size: u32,
    /// Pixels per stud (within the configured instruction bounds)
    pub cell: Option<u32>,
}

/// One legend entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LegendEntry {
    /// Number printed on the instruction sheet
    pub number: usize,
    pub name: String,
    pub count: usize,
    pub hex: String,
}

/// One shopping list row
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShoppingItem {
    pub name: String,
    pub quantity: usize,
    pub swatch_hex: String,
}

/// Mosaic summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MosaicResponse {
    /// Grid dimension N
    pub size: u32,
    /// Size label, e.g. "32×32"
    pub size_label: String,
    /// Palette id used for the build
    pub palette: String,
    /// Sum of all shopping list quantities
    pub total_pieces: usize,
    /// Colors in legend order
    pub legend: Vec<LegendEntry>,
    /// Colors sorted by quantity, descending
    pub shopping_list: Vec<ShoppingItem>,
    /// Counted colors missing from the palette
    pub skipped: Vec<String>,
    /// Tolerated problems met during the build
    pub warnings: Vec<String>,
    /// `data:image/png;base64,...` preview when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

fn query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(q)| q)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

fn body(body: Result<Bytes, BytesRejection>, config: &AppConfig) -> Result<Bytes, ApiError> {
    match body {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => Err(ApiError::PayloadTooLarge {
            max: config.max_upload_bytes,
        }),
        Err(e) => Err(ApiError::BadRequest(e.body_text())),
    }
}

fn png_response(png: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], png).into_response()
}

fn summarize(service: &MosaicService, mosaic: &Mosaic, palette: String) -> MosaicResponse {
    let manifest = service.shopping_list(mosaic);
    let legend = legend_items(&mosaic.counts, mosaic.palette())
        .into_iter()
        .map(|item| LegendEntry {
            number: item.number,
            name: item.name,
            count: item.count,
            hex: item.swatch.to_hex(),
        })
        .collect();

    MosaicResponse {
        size: mosaic.size().get(),
        size_label: mosaic.size().label(),
        palette,
        total_pieces: manifest.total(),
        legend,
        shopping_list: manifest
            .entries
            .into_iter()
            .map(|e| ShoppingItem {
                name: e.name,
                quantity: e.quantity,
                swatch_hex: e.swatch_hex,
            })
            .collect(),
        skipped: manifest.skipped,
        warnings: mosaic.warnings.iter().map(|w| w.to_string()).collect(),
        preview: None,
    }
}

/// Build a mosaic and return its summary
///
/// The request body is the encoded source image.
#[utoipa::path(
    post,
    path = "/api/mosaic",
    params(MosaicQuery),
    request_body(content = String, content_type = "application/octet-stream", description = "Encoded image (PNG, JPEG, GIF, WebP, BMP)"),
    responses(
        (status = 200, description = "Mosaic built", body = MosaicResponse),
        (status = 400, description = "Empty body or unsupported size"),
        (status = 404, description = "Unknown palette"),
        (status = 413, description = "Upload too large"),
        (status = 422, description = "Image could not be decoded"),
    ),
    tag = "Mosaic"
)]
pub async fn handle_mosaic(
    State(service): State<Arc<MosaicService>>,
    State(config): State<Arc<AppConfig>>,
    params: Result<Query<MosaicQuery>, QueryRejection>,
    payload: Result<Bytes, BytesRejection>,
) -> Result<Json<MosaicResponse>, ApiError> {
    let params = query(params)?;
    let bytes = body(payload, &config)?;
    let palette_id = service
        .resolve_palette(params.palette.as_deref())?
        .palette
        .id()
        .to_string();

    let mosaic = service
        .build(bytes, Some(palette_id.as_str()), params.size)
        .await?;
    let mut response = summarize(&service, &mosaic, palette_id);

    if params.include_preview {
        let style = service.resolve_palette(Some(response.palette.as_str()))?.preview_style;
        let png = service
            .preview_png(
                mosaic,
                config.preview.default_cell,
                style,
                config.preview.outline,
            )
            .await?;
        response.preview = Some(format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        ));
    }

    tracing::info!(
        palette = %response.palette,
        size = response.size,
        colors = response.legend.len(),
        pieces = response.total_pieces,
        "Mosaic built"
    );
    Ok(Json(response))
}

/// Build a mosaic and return the preview image
#[utoipa::path(
    post,
    path = "/api/mosaic/preview",
    params(PreviewQuery),
    request_body(content = String, content_type = "application/octet-stream", description = "Encoded image"),
    responses(
        (status = 200, description = "Preview PNG", content_type = "image/png"),
        (status = 400, description = "Empty body, unsupported size or cell size"),
        (status = 404, description = "Unknown palette"),
        (status = 413, description = "Upload too large"),
        (status = 422, description = "Image could not be decoded"),
    ),
    tag = "Mosaic"
)]
pub async fn handle_preview(
    State(service): State<Arc<MosaicService>>,
    State(config): State<Arc<AppConfig>>,
    params: Result<Query<PreviewQuery>, QueryRejection>,
    payload: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let params = query(params)?;
    let bytes = body(payload, &config)?;

    let cell = params.cell.unwrap_or(config.preview.default_cell);
    if !config.preview.accepts(cell) {
        return Err(ApiError::BadRequest(format!(
            "cell must be between {} and {} pixels",
            config.preview.min_cell, config.preview.max_cell
        )));
    }
    let stored = service.resolve_palette(params.palette.as_deref())?;
    let style = params.style.unwrap_or(stored.preview_style);
    let palette_id = stored.palette.id().to_string();

    let mosaic = service
        .build(bytes, Some(palette_id.as_str()), params.size)
        .await?;
    let png = service
        .preview_png(
            mosaic,
            cell,
            style,
            params.outline.unwrap_or(config.preview.outline),
        )
        .await?;
    Ok(png_response(png))
}

/// Build a mosaic and return the numbered instruction sheet
#[utoipa::path(
    post,
    path = "/api/mosaic/instructions",
    params(InstructionsQuery),
    request_body(content = String, content_type = "application/octet-stream", description = "Encoded image"),
    responses(
        (status = 200, description = "Instruction sheet PNG", content_type = "image/png"),
        (status = 400, description = "Empty body, unsupported size or cell size"),
        (status = 404, description = "Unknown palette"),
        (status = 413, description = "Upload too large"),
        (status = 422, description = "Image could not be decoded"),
    ),
    tag = "Mosaic"
)]
pub async fn handle_instructions(
    State(service): State<Arc<MosaicService>>,
    State(config): State<Arc<AppConfig>>,
    params: Result<Query<InstructionsQuery>, QueryRejection>,
    payload: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let params = query(params)?;
    let bytes = body(payload, &config)?;

    let cell = params.cell.unwrap_or(config.instructions.cell);
    if !config.instructions.accepts(cell) {
        return Err(ApiError::BadRequest(format!(
            "cell must be between {} and {} pixels",
            config.instructions.min_cell, config.instructions.max_cell
        )));
    }

    let mosaic = service
        .build(bytes, params.palette.as_deref(), params.size)
        .await?;
    let png = service.instructions_png(mosaic, cell).await?;
    Ok(png_response(png))
}

/// Build a mosaic and return the shopping list as CSV
#[utoipa::path(
    post,
    path = "/api/mosaic/shopping-list",
    params(MosaicQuery),
    request_body(content = String, content_type = "application/octet-stream", description = "Encoded image"),
    responses(
        (status = 200, description = "Shopping list CSV", content_type = "text/csv"),
        (status = 400, description = "Empty body or unsupported size"),
        (status = 404, description = "Unknown palette"),
        (status = 413, description = "Upload too large"),
        (status = 422, description = "Image could not be decoded"),
    ),
    tag = "Mosaic"
)]
pub async fn handle_shopping_list(
    State(service): State<Arc<MosaicService>>,
    State(config): State<Arc<AppConfig>>,
    params: Result<Query<MosaicQuery>, QueryRejection>,
    payload: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let params = query(params)?;
    let bytes = body(payload, &config)?;

    let mosaic = service
        .build(bytes, params.palette.as_deref(), params.size)
        .await?;
    let csv = service
        .shopping_list(&mosaic)
        .to_csv()
        .map_err(|e| ApiError::Internal(format!("CSV export failed: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_list.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

/// The built-in demo image
///
/// A 300×300 gradient that can be posted back to the mosaic endpoints.
#[utoipa::path(
    get,
    path = "/api/demo-image",
    responses(
        (status = 200, description = "Demo PNG", content_type = "image/png"),
    ),
    tag = "Mosaic"
)]
pub async fn handle_demo_image() -> Result<Response, ApiError> {
    let png = tokio::task::spawn_blocking(|| -> Result<Vec<u8>, ApiError> {
        let mut buf = std::io::Cursor::new(Vec::new());
        mosaic_core::demo_image()
            .write_to(&mut buf, image::ImageFormat::Png)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok(buf.into_inner())
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Demo task failed: {e}")))??;
    Ok(png_response(png))
}
