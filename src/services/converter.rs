use crate::error::SpriteError;
use crate::models::{AppConfig, SpriteSpec};
use crate::rendering::{decode_image, encode_sprite_png, OutputFormat};
use msx_quant::SpriteConverter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Per-request conversion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub spec: SpriteSpec,
    pub format: OutputFormat,
    pub optimize: bool,
}

/// Result of one conversion.
#[derive(Debug, Clone)]
pub struct ConvertedSprite {
    /// Encoded PNG bytes
    pub png: Vec<u8>,
    pub spec: SpriteSpec,
    /// Source image size before resampling
    pub source_width: u32,
    pub source_height: u32,
}

impl ConvertedSprite {
    /// Suggested download name, `msx-sprite-{W}x{H}.png`.
    pub fn file_name(&self) -> String {
        self.spec.file_name()
    }
}

/// Decode -> convert -> encode, with the limits from the app configuration.
pub struct ConversionService {
    config: Arc<AppConfig>,
}

impl ConversionService {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Options from the configured defaults.
    pub fn default_options(&self) -> ConvertOptions {
        ConvertOptions {
            spec: self.config.default_spec(),
            format: self.config.output.format,
            optimize: self.config.output.optimize,
        }
    }

    /// Run a conversion on the current thread.
    pub fn convert_blocking(
        &self,
        bytes: &[u8],
        options: &ConvertOptions,
    ) -> Result<ConvertedSprite, SpriteError> {
        convert_image(bytes, options, self.config.limits.max_source_pixels)
    }

    /// Run a conversion without blocking the async runtime.
    ///
    /// Decoding, resampling, quantizing and encoding are all CPU-bound, so
    /// the whole job runs under `spawn_blocking`.
    pub async fn convert<B>(
        &self,
        bytes: B,
        options: ConvertOptions,
    ) -> Result<ConvertedSprite, SpriteError>
    where
        B: AsRef<[u8]> + Send + 'static,
    {
        let max_pixels = self.config.limits.max_source_pixels;

        tokio::task::spawn_blocking(move || convert_image(bytes.as_ref(), &options, max_pixels))
            .await
            .map_err(|e| SpriteError::Task(e.to_string()))?
    }

    /// Convert `input` and write the sprite to `output`, or to
    /// `msx-sprite-{W}x{H}.png` in `default_dir` when no output is given.
    ///
    /// Returns the path written.
    pub fn convert_file(
        &self,
        input: &Path,
        output: Option<&Path>,
        default_dir: &Path,
        options: &ConvertOptions,
    ) -> Result<(PathBuf, ConvertedSprite), SpriteError> {
        let bytes = std::fs::read(input)?;
        let sprite = self.convert_blocking(&bytes, options)?;
        let path = match output {
            Some(path) => path.to_path_buf(),
            None => default_dir.join(sprite.file_name()),
        };
        std::fs::write(&path, &sprite.png)?;
        tracing::debug!(path = %path.display(), bytes = sprite.png.len(), "Wrote sprite");
        Ok((path, sprite))
    }
}

fn convert_image(
    bytes: &[u8],
    options: &ConvertOptions,
    max_source_pixels: u64,
) -> Result<ConvertedSprite, SpriteError> {
    let started = Instant::now();

    let bitmap = decode_image(bytes, max_source_pixels)?;
    let sprite = SpriteConverter::msx()
        .size(options.spec.width, options.spec.height)
        .convert(&bitmap)?;
    let png = encode_sprite_png(&sprite, options.format, options.optimize)?;

    tracing::info!(
        source_width = bitmap.width(),
        source_height = bitmap.height(),
        width = options.spec.width,
        height = options.spec.height,
        format = ?options.format,
        bytes = png.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Converted sprite"
    );

    Ok(ConvertedSprite {
        png,
        spec: options.spec,
        source_width: bitmap.width(),
        source_height: bitmap.height(),
    })
}
