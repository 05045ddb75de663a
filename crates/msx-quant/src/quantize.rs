//! Per-pixel nearest-color palette quantization.
//!
//! Every pixel is snapped independently to its closest palette entry. There
//! is no error diffusion, so the result depends only on each pixel's own RGB
//! value. Input alpha is ignored and output alpha is always 255.

use std::collections::HashMap;

use crate::bitmap::{Bitmap, CHANNELS};
use crate::color::Rgb;
use crate::output::SpriteImage;
use crate::palette::Palette;

/// Upper bound on memoized colors per quantizer.
const CACHE_LIMIT: usize = 1 << 16;

/// Nearest-color matcher with a per-instance memo.
///
/// Sprite sources tend to repeat a small number of colors, so lookups are
/// memoized by exact RGB value. The memo never changes results; it only
/// skips repeated linear scans. A `Quantizer` is cheap to create and is
/// meant to live for one conversion.
///
/// # Example
///
/// ```
/// use msx_quant::{Bitmap, Palette, Quantizer};
///
/// let palette = Palette::msx();
/// let source = Bitmap::filled(2, 2, [255, 0, 0, 0]).unwrap();
///
/// let sprite = Quantizer::new(&palette).quantize(&source);
/// assert_eq!(sprite.indices(), &[5, 5, 5, 5]);
/// assert_eq!(sprite.to_bitmap().pixel(0, 0), [185, 94, 74, 255]);
/// ```
#[derive(Debug)]
pub struct Quantizer<'a> {
    palette: &'a Palette,
    cache: HashMap<Rgb, u8>,
}

impl<'a> Quantizer<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            cache: HashMap::new(),
        }
    }

    /// The palette this quantizer matches against.
    #[inline]
    pub fn palette(&self) -> &'a Palette {
        self.palette
    }

    /// Palette index nearest to `color`. Ties go to the lowest index.
    pub fn nearest(&mut self, color: Rgb) -> usize {
        if let Some(&idx) = self.cache.get(&color) {
            return idx as usize;
        }
        let (idx, _) = self.palette.find_nearest(color);
        if self.cache.len() < CACHE_LIMIT {
            // Palette construction caps the size at 256, so idx fits in u8
            self.cache.insert(color, idx as u8);
        }
        idx
    }

    /// One palette index per pixel, row-major.
    pub fn quantize_indices(&mut self, bitmap: &Bitmap) -> Vec<u8> {
        bitmap
            .pixels()
            .map(|p| self.nearest(Rgb::new(p[0], p[1], p[2])) as u8)
            .collect()
    }

    /// Quantize into an indexed [`SpriteImage`].
    pub fn quantize(&mut self, bitmap: &Bitmap) -> SpriteImage {
        let indices = self.quantize_indices(bitmap);
        SpriteImage::new(
            indices,
            bitmap.width(),
            bitmap.height(),
            self.palette.clone(),
        )
    }
}

/// Replace each pixel of `bitmap` by its nearest `palette` color.
///
/// The output has the same dimensions; every pixel's RGB is a palette entry
/// and its alpha is 255.
///
/// ```
/// use msx_quant::{quantize, Bitmap, Palette};
///
/// let source = Bitmap::filled(1, 1, [0, 0, 0, 17]).unwrap();
/// let output = quantize(&source, &Palette::msx());
/// assert_eq!(output.pixel(0, 0), [0, 0, 0, 255]);
/// ```
pub fn quantize(bitmap: &Bitmap, palette: &Palette) -> Bitmap {
    let mut quantizer = Quantizer::new(palette);
    let mut data = Vec::with_capacity(bitmap.pixel_count() * CHANNELS);
    for p in bitmap.pixels() {
        let idx = quantizer.nearest(Rgb::new(p[0], p[1], p[2]));
        data.extend_from_slice(&palette.color(idx).to_rgba());
    }
    Bitmap::from_parts(bitmap.width(), bitmap.height(), data)
}
