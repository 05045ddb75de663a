//! Nearest-neighbour resampling.
//!
//! Each destination pixel copies exactly one source pixel, so hard pixel
//! edges survive any scale factor and no new colors are introduced.

use std::fmt;

use crate::bitmap::{checked_byte_len, Bitmap, CHANNELS};

/// Error type for resampling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResampleError {
    /// Target width or height is zero
    InvalidDimension {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
    /// Target buffer size overflows `usize`
    TooLarge {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

impl fmt::Display for ResampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResampleError::InvalidDimension { width, height } => {
                write!(
                    f,
                    "invalid target dimensions {}x{} (both must be at least 1)",
                    width, height
                )
            }
            ResampleError::TooLarge { width, height } => {
                write!(f, "target dimensions {}x{} are too large", width, height)
            }
        }
    }
}

impl std::error::Error for ResampleError {}

/// Resize `source` to `width` x `height` with nearest-neighbour sampling.
///
/// Destination pixel `(x, y)` takes source pixel
/// `(floor(x * sw / width), floor(y * sh / height))`, clamped to the source
/// bounds. Up- and downscaling, and non-uniform aspect changes, all use the
/// same rule.
///
/// # Errors
///
/// - [`ResampleError::InvalidDimension`] if `width` or `height` is zero
/// - [`ResampleError::TooLarge`] if the target buffer size overflows `usize`
///
/// # Example
///
/// ```
/// use msx_quant::{resample_nearest, Bitmap};
///
/// let white = Bitmap::filled(4, 4, [255, 255, 255, 255]).unwrap();
/// let small = resample_nearest(&white, 2, 2).unwrap();
///
/// assert_eq!(small.width(), 2);
/// assert!(small.pixels().all(|p| p == [255, 255, 255, 255]));
/// ```
pub fn resample_nearest(source: &Bitmap, width: u32, height: u32) -> Result<Bitmap, ResampleError> {
    if width == 0 || height == 0 {
        return Err(ResampleError::InvalidDimension { width, height });
    }

    if width == source.width() && height == source.height() {
        return Ok(source.clone());
    }

    let len =
        checked_byte_len(width, height).ok_or(ResampleError::TooLarge { width, height })?;

    let columns = source_indices(source.width(), width);
    let rows = source_indices(source.height(), height);

    let mut data = Vec::with_capacity(len);
    for &sy in &rows {
        let src_row = source.row(sy);
        for &sx in &columns {
            let offset = sx as usize * CHANNELS;
            data.extend_from_slice(&src_row[offset..offset + CHANNELS]);
        }
    }

    Ok(Bitmap::from_parts(width, height, data))
}

/// Source coordinate for every destination coordinate along one axis.
///
/// `src_len` and `dst_len` are both at least 1. The product is computed in
/// 64 bits so large images cannot overflow.
fn source_indices(src_len: u32, dst_len: u32) -> Vec<u32> {
    let max = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let s = (d as u64 * src_len as u64) / dst_len as u64;
            (s as u32).min(max)
        })
        .collect()
}
