//! Unified error type for the msx-quant public API.

use crate::bitmap::BitmapError;
use crate::palette::PaletteError;
use crate::resample::ResampleError;
use std::fmt;

/// Unified error type for the msx-quant public API.
///
/// Wraps all error types from the crate into a single enum for
/// convenient `?` propagation in application code.
///
/// # Example
///
/// ```
/// use msx_quant::{Bitmap, ConvertError, SpriteConverter};
///
/// fn to_sprite(rgba: Vec<u8>, w: u32, h: u32) -> Result<Vec<u8>, ConvertError> {
///     let bitmap = Bitmap::new(w, h, rgba)?;
///     let sprite = SpriteConverter::msx().size(8, 8).convert(&bitmap)?;
///     Ok(sprite.to_rgba())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// Source bitmap validation error
    Bitmap(BitmapError),
    /// Palette validation error (empty, too large, duplicates)
    Palette(PaletteError),
    /// Resampler rejected the target size
    Resample(ResampleError),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Bitmap(err) => write!(f, "bitmap error: {}", err),
            ConvertError::Palette(err) => write!(f, "palette error: {}", err),
            ConvertError::Resample(err) => write!(f, "resample error: {}", err),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Bitmap(err) => Some(err),
            ConvertError::Palette(err) => Some(err),
            ConvertError::Resample(err) => Some(err),
        }
    }
}

impl From<BitmapError> for ConvertError {
    fn from(err: BitmapError) -> Self {
        ConvertError::Bitmap(err)
    }
}

impl From<PaletteError> for ConvertError {
    fn from(err: PaletteError) -> Self {
        ConvertError::Palette(err)
    }
}

impl From<ResampleError> for ConvertError {
    fn from(err: ResampleError) -> Self {
        ConvertError::Resample(err)
    }
}
