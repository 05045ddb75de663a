use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::SpriteSpec;
use crate::rendering::OutputFormat;
use crate::server::AppState;
use crate::services::ConvertOptions;

/// Query parameters for `POST /api/convert`.
///
/// `width` and `height` are free-form: they are read like number inputs in
/// a form (see [`crate::models::parse_dimension`]) and capped at the
/// configured maximum.
#[derive(Debug, Default, Deserialize)]
pub struct ConvertQuery {
    pub width: Option<String>,
    pub height: Option<String>,
    pub format: Option<OutputFormat>,
    pub optimize: Option<bool>,
}

impl ConvertQuery {
    /// Merge the query with the configured defaults.
    pub fn options(&self, defaults: ConvertOptions, max_dimension: u32) -> ConvertOptions {
        let width = self.width.as_deref().map_or_else(
            || defaults.spec.width.to_string(),
            str::to_string,
        );
        let height = self.height.as_deref().map_or_else(
            || defaults.spec.height.to_string(),
            str::to_string,
        );
        ConvertOptions {
            spec: SpriteSpec::clamped(&width, &height, max_dimension),
            format: self.format.unwrap_or(defaults.format),
            optimize: self.optimize.unwrap_or(defaults.optimize),
        }
    }
}

/// Convert an uploaded image into an MSX sprite.
///
/// The request body is the raw image file. The response is the sprite PNG
/// as an attachment named `msx-sprite-{W}x{H}.png`. Malformed query strings
/// and oversized bodies get the same JSON error body as conversion failures.
pub async fn handle_convert(
    State(state): State<AppState>,
    query: Result<Query<ConvertQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let body = body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(e.body_text())
        } else {
            ApiError::BadRequest(e.body_text())
        }
    })?;

    if body.is_empty() {
        return Err(ApiError::BadRequest(
            "request body must contain an image".to_string(),
        ));
    }

    let options = query.options(
        state.converter.default_options(),
        state.config.sprite.max_dimension,
    );

    tracing::info!(
        upload_bytes = body.len(),
        width = options.spec.width,
        height = options.spec.height,
        "Convert request received"
    );

    let sprite = state.converter.convert(body, options).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", sprite.file_name()),
            ),
        ],
        sprite.png,
    )
        .into_response())
}
