//! Error types for bitmap construction.

use std::fmt;

/// Error type for bitmap validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitmapError {
    /// Width or height is zero
    InvalidDimension {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
    /// `width * height * 4` does not fit in `usize`
    TooLarge {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
    /// Pixel buffer length does not equal `width * height * 4`
    BufferSize {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },
}

impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitmapError::InvalidDimension { width, height } => {
                write!(
                    f,
                    "invalid bitmap dimensions {}x{} (both must be at least 1)",
                    width, height
                )
            }
            BitmapError::TooLarge { width, height } => {
                write!(f, "bitmap dimensions {}x{} are too large", width, height)
            }
            BitmapError::BufferSize { expected, actual } => {
                write!(
                    f,
                    "pixel buffer has {} bytes, expected {}",
                    actual, expected
                )
            }
        }
    }
}

impl std::error::Error for BitmapError {}
