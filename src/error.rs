use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mosaic_core::{BuildError, PaletteError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    #[error("Upload too large (max {max} bytes)")]
    PayloadTooLarge { max: usize },

    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Nothing to render")]
    NothingToRender,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PaletteError> for ApiError {
    fn from(e: PaletteError) -> Self {
        match e {
            PaletteError::UnknownPalette(id) => ApiError::UnknownPalette(id),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Invalid cell size: {0}px")]
    InvalidCellSize(u32),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownPalette(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Build(BuildError::UnsupportedSize(_)) => StatusCode::BAD_REQUEST,
            ApiError::Build(BuildError::EmptyImage | BuildError::Decode(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Build(BuildError::Resample(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Render(RenderError::InvalidCellSize(_)) => StatusCode::BAD_REQUEST,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NothingToRender => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
