//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        DefaultBodyLimit, Query, State,
    },
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use mosaic_core::{MosaicBuilder, Resampler};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::{self, InstructionsQuery, MosaicQuery, PreviewQuery};
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::rendering::MosaicRenderer;
use crate::services::{MosaicService, PaletteStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service: Arc<MosaicService>,
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = Arc::new(AppConfig::load_from_assets(&asset_loader));
    let store = PaletteStore::load(&config, &asset_loader);
    if store.is_empty() {
        anyhow::bail!("No palettes configured");
    }

    let resampler = Resampler::probe(&config.resample_filters);
    tracing::info!(filter = resampler.filter().name(), "Selected resample filter");

    let renderer = MosaicRenderer::with_fonts(asset_loader.get_fonts());
    tracing::info!(fonts = renderer.font_count(), "Loaded fonts");

    let service = Arc::new(MosaicService::new(
        Arc::new(store),
        Arc::new(MosaicBuilder::with_resampler(resampler)),
        Arc::new(renderer),
    ));

    Ok(AppState { config, service })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;

    Router::new()
        .route("/api/palettes", get(handle_palettes))
        .route("/api/demo-image", get(api::handle_demo_image))
        .route("/api/mosaic", post(handle_mosaic))
        .route("/api/mosaic/preview", post(handle_preview))
        .route("/api/mosaic/instructions", post(handle_instructions))
        .route("/api/mosaic/shopping-list", post(handle_shopping_list))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_palettes(State(state): State<AppState>) -> Json<api::PalettesResponse> {
    api::handle_palettes(State(state.service), State(state.config)).await
}

async fn handle_mosaic(
    State(state): State<AppState>,
    query: Result<Query<MosaicQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<api::MosaicResponse>, ApiError> {
    api::handle_mosaic(State(state.service), State(state.config), query, body).await
}

async fn handle_preview(
    State(state): State<AppState>,
    query: Result<Query<PreviewQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    api::handle_preview(State(state.service), State(state.config), query, body).await
}

async fn handle_instructions(
    State(state): State<AppState>,
    query: Result<Query<InstructionsQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    api::handle_instructions(State(state.service), State(state.config), query, body).await
}

async fn handle_shopping_list(
    State(state): State<AppState>,
    query: Result<Query<MosaicQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    api::handle_shopping_list(State(state.service), State(state.config), query, body).await
}
