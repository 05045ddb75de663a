//! SpriteConverter builder -- the primary entry point for the crate.
//!
//! [`SpriteConverter`] wraps the two pipeline stages (resample, quantize)
//! behind a small fluent configuration.

use crate::bitmap::Bitmap;
use crate::output::SpriteImage;
use crate::palette::Palette;
use crate::quantize::Quantizer;
use crate::resample::resample_nearest;

use super::error::ConvertError;

/// Default sprite edge length in pixels.
pub const DEFAULT_SPRITE_SIZE: u32 = 64;

/// Image-to-sprite converter.
///
/// # Design
///
/// - Constructor requires a [`Palette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`convert()`](Self::convert) takes `&self`, so one converter can be
///   shared across threads and reused for many images
/// - Stages always run in the order resample, then quantize, so the
///   output never contains a non-palette color
///
/// # Example
///
/// ```
/// use msx_quant::{Bitmap, SpriteConverter};
///
/// let converter = SpriteConverter::msx().size(2, 2);
///
/// let source = Bitmap::filled(4, 4, [255, 255, 255, 255]).unwrap();
/// let sprite = converter.convert(&source).unwrap();
///
/// assert_eq!(sprite.width(), 2);
/// assert_eq!(sprite.indices(), &[14, 14, 14, 14]);
/// ```
#[derive(Debug, Clone)]
pub struct SpriteConverter {
    palette: Palette,
    width: u32,
    height: u32,
}

impl SpriteConverter {
    /// Create a converter for `palette`, targeting 64x64.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            width: DEFAULT_SPRITE_SIZE,
            height: DEFAULT_SPRITE_SIZE,
        }
    }

    /// Converter for the fixed MSX palette.
    pub fn msx() -> Self {
        Self::new(Palette::msx())
    }

    /// Set target sprite dimensions.
    ///
    /// Zero is accepted here and rejected by [`convert()`](Self::convert).
    #[inline]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Target `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Run the pipeline on `source`.
    ///
    /// 1. Resample to the target size (nearest neighbour)
    /// 2. Quantize every pixel to the palette
    ///
    /// # Errors
    ///
    /// [`ConvertError::Resample`] if a target dimension is zero.
    pub fn convert(&self, source: &Bitmap) -> Result<SpriteImage, ConvertError> {
        let resized = resample_nearest(source, self.width, self.height)?;
        Ok(Quantizer::new(&self.palette).quantize(&resized))
    }

    /// Like [`convert()`](Self::convert), returning an opaque RGBA bitmap.
    pub fn convert_to_bitmap(&self, source: &Bitmap) -> Result<Bitmap, ConvertError> {
        Ok(self.convert(source)?.to_bitmap())
    }
}

impl Default for SpriteConverter {
    fn default() -> Self {
        Self::msx()
    }
}

/// Shorthand for one-off conversions with the MSX palette.
///
/// ```
/// use msx_quant::{convert_msx, Bitmap};
///
/// let source = Bitmap::filled(3, 3, [0, 0, 0, 255]).unwrap();
/// let sprite = convert_msx(&source, 1, 1).unwrap();
/// assert_eq!(sprite.indices(), &[0]);
/// ```
pub fn convert_msx(source: &Bitmap, width: u32, height: u32) -> Result<SpriteImage, ConvertError> {
    SpriteConverter::msx().size(width, height).convert(source)
}
