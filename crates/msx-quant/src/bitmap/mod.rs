//! RGBA bitmap container.
//!
//! [`Bitmap`] is the input and output type of both pipeline stages: a flat,
//! row-major buffer of `width * height` pixels, 4 bytes each in
//! `[R, G, B, A]` order.

mod error;

pub use error::BitmapError;

use crate::color::Rgb;

/// Bytes per pixel.
pub const CHANNELS: usize = 4;

/// A validated RGBA8 image buffer.
///
/// The constructor guarantees `width >= 1`, `height >= 1` and
/// `data.len() == width * height * 4`.
///
/// # Example
///
/// ```
/// use msx_quant::Bitmap;
///
/// let bitmap = Bitmap::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
/// assert_eq!(bitmap.pixel(1, 0), [0, 0, 255, 128]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Wrap an RGBA buffer.
    ///
    /// # Errors
    ///
    /// - [`BitmapError::InvalidDimension`] if either dimension is zero
    /// - [`BitmapError::TooLarge`] if the buffer size overflows `usize`
    /// - [`BitmapError::BufferSize`] if `data` has the wrong length
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BitmapError> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(BitmapError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A bitmap with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, BitmapError> {
        let len = byte_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from already validated parts.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * CHANNELS,
            "buffer length must match {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The raw RGBA bytes.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the bitmap, returning the RGBA bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// The pixel at `(x, y)` as `[R, G, B, A]`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} bitmap",
            x,
            y,
            self.width,
            self.height
        );
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let p = &self.data[offset..offset + CHANNELS];
        [p[0], p[1], p[2], p[3]]
    }

    /// The RGB part of the pixel at `(x, y)`.
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> Rgb {
        let [r, g, b, _] = self.pixel(x, y);
        Rgb::new(r, g, b)
    }

    /// Iterate over pixels in row-major order as 4-byte slices.
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(CHANNELS)
    }

    /// One row of RGBA bytes.
    #[inline]
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * CHANNELS;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }
}

fn byte_len(width: u32, height: u32) -> Result<usize, BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidDimension { width, height });
    }
    checked_byte_len(width, height).ok_or(BitmapError::TooLarge { width, height })
}

/// `width * height * CHANNELS`, or `None` on overflow.
pub(crate) fn checked_byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}
