use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use msx_quant::ConvertError;
use serde_json::json;
use thiserror::Error;

/// Message shown to users when an upload cannot be decoded.
pub const DECODE_FAILURE_MESSAGE: &str = "Failed to load the image. Please try a different file.";

/// Message shown to users for failures they cannot fix by changing input.
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "An unexpected error occurred during conversion.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Sprite error: {0}")]
    Sprite(#[from] SpriteError),
}

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Invalid sprite dimensions: {width}x{height} (each must be between 1 and {max})")]
    InvalidDimension { width: u32, height: u32, max: u32 },

    #[error("Source image too large: {pixels} pixels (max {max})")]
    SourceTooLarge { pixels: u64, max: u64 },

    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Conversion task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpriteError {
    /// Status code and user-facing message.
    ///
    /// Decode and internal failures get fixed messages; their details only
    /// go to the log.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            SpriteError::Decode(_) => (StatusCode::BAD_REQUEST, DECODE_FAILURE_MESSAGE.to_string()),
            SpriteError::InvalidDimension { .. } | SpriteError::Convert(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            SpriteError::SourceTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),
            SpriteError::PngEncode(_) | SpriteError::Task(_) | SpriteError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UNEXPECTED_FAILURE_MESSAGE.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),
            ApiError::Sprite(e) => e.status_and_message(),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
