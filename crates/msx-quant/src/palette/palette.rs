//! Palette struct with nearest-color matching.

use std::collections::HashSet;

use super::error::PaletteError;
use super::msx::MSX_COLORS;
use super::MAX_PALETTE_SIZE;
use crate::color::{NamedColor, Rgb};

/// An ordered, immutable set of allowed output colors.
///
/// Entry order is significant: when two entries are equally close to a
/// pixel, the one with the lower index wins.
///
/// # Example
///
/// ```
/// use msx_quant::{Palette, Rgb};
///
/// let colors = [Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)];
/// let palette = Palette::new(&colors).unwrap();
///
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.find_nearest(Rgb::new(200, 200, 200)).0, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<NamedColor>,
    // Hot copy of the entry colors for the matching loop
    rgb: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from a list of colors.
    ///
    /// Accepts plain [`Rgb`] values or [`NamedColor`]s.
    ///
    /// # Errors
    ///
    /// - `colors` is empty ([`PaletteError::Empty`])
    /// - more than 256 colors ([`PaletteError::TooManyColors`])
    /// - the same RGB value appears twice ([`PaletteError::DuplicateColor`]);
    ///   a later duplicate could never be selected
    pub fn new<C>(colors: &[C]) -> Result<Self, PaletteError>
    where
        C: Copy + Into<NamedColor>,
    {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        if colors.len() > MAX_PALETTE_SIZE {
            return Err(PaletteError::TooManyColors {
                count: colors.len(),
            });
        }

        let entries: Vec<NamedColor> = colors.iter().map(|&c| c.into()).collect();

        let mut seen = HashSet::new();
        for (i, entry) in entries.iter().enumerate() {
            if !seen.insert(entry.rgb()) {
                return Err(PaletteError::DuplicateColor { index: i });
            }
        }

        Ok(Self::from_entries(entries))
    }

    /// The fixed 15-color MSX palette.
    ///
    /// ```
    /// use msx_quant::Palette;
    ///
    /// let palette = Palette::msx();
    /// assert_eq!(palette.len(), 15);
    /// assert_eq!(palette.entry(5).name(), Some("Dark Red"));
    /// ```
    pub fn msx() -> Self {
        Self::from_entries(MSX_COLORS.to_vec())
    }

    fn from_entries(entries: Vec<NamedColor>) -> Self {
        let rgb = entries.iter().map(NamedColor::rgb).collect();
        Self { entries, rgb }
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.rgb.len()
    }

    /// Always `false`: empty palettes are rejected at construction time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rgb.is_empty()
    }

    /// The RGB value at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.rgb[idx]
    }

    /// The full entry (color and name) at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn entry(&self, idx: usize) -> &NamedColor {
        &self.entries[idx]
    }

    /// All entries in palette order.
    #[inline]
    pub fn entries(&self) -> &[NamedColor] {
        &self.entries
    }

    /// Find the palette entry closest to `color`.
    ///
    /// Returns `(index, squared_distance)`. Distance is squared Euclidean in
    /// raw RGB. The scan only replaces the current best on a strictly
    /// smaller distance, so ties resolve to the lowest index.
    ///
    /// # Example
    ///
    /// ```
    /// use msx_quant::{Palette, Rgb};
    ///
    /// let palette = Palette::msx();
    /// let (idx, dist) = palette.find_nearest(Rgb::new(255, 0, 0));
    /// assert_eq!(palette.entry(idx).name(), Some("Dark Red"));
    /// assert_eq!(dist, 19212);
    /// ```
    #[inline]
    pub fn find_nearest(&self, color: Rgb) -> (usize, u32) {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, &entry) in self.rgb.iter().enumerate() {
            let dist = color.distance_squared(entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
                if dist == 0 {
                    break;
                }
            }
        }

        (best_idx, best_dist)
    }

    /// Index of the entry whose color is exactly `color`, if any.
    pub fn position(&self, color: Rgb) -> Option<usize> {
        self.rgb.iter().position(|&c| c == color)
    }
}
