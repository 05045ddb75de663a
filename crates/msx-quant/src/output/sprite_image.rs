//! SpriteImage: indexed quantizer output.

use crate::bitmap::{Bitmap, CHANNELS};
use crate::color::Rgb;
use crate::palette::Palette;

/// The canonical output of the conversion pipeline.
///
/// Stores one `u8` palette index per pixel in row-major order, the image
/// dimensions, and the palette the indices refer to. Two output forms are
/// available:
///
/// - [`indices()`](SpriteImage::indices): raw palette indices, for indexed
///   image formats
/// - [`to_bitmap()`](SpriteImage::to_bitmap): opaque RGBA pixels
///
/// # Example
///
/// ```
/// use msx_quant::{Palette, SpriteImage};
///
/// let image = SpriteImage::new(vec![0, 14, 14, 0], 2, 2, Palette::msx());
///
/// assert_eq!(image.indices(), &[0, 14, 14, 0]);
/// let rgba = image.to_rgba();
/// assert_eq!(rgba.len(), 2 * 2 * 4);
/// assert_eq!(&rgba[4..8], &[255, 255, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteImage {
    indices: Vec<u8>,
    width: u32,
    height: u32,
    palette: Palette,
}

impl SpriteImage {
    /// Wrap quantized indices.
    ///
    /// Each index must be in `0..palette.len()`.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(indices: Vec<u8>, width: u32, height: u32, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width as usize * height as usize,
            "indices length ({}) must match width * height ({}x{})",
            indices.len(),
            width,
            height,
        );
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The color of pixel `(x, y)`.
    pub fn color_at(&self, x: u32, y: u32) -> Rgb {
        let idx = self.indices[y as usize * self.width as usize + x as usize];
        self.palette.color(idx as usize)
    }

    /// Flat RGBA bytes, alpha always 255. Length is `width * height * 4`.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.indices.len() * CHANNELS);
        for &idx in &self.indices {
            rgba.extend_from_slice(&self.palette.color(idx as usize).to_rgba());
        }
        rgba
    }

    /// Expand to an opaque RGBA [`Bitmap`].
    pub fn to_bitmap(&self) -> Bitmap {
        Bitmap::from_parts(self.width, self.height, self.to_rgba())
    }

    /// How many pixels use each palette entry, indexed like the palette.
    pub fn histogram(&self) -> Vec<usize> {
        let mut counts = vec![0; self.palette.len()];
        for &idx in &self.indices {
            counts[idx as usize] += 1;
        }
        counts
    }
}
