//! Palette types
//!
//! [`Palette`] holds the ordered list of allowed output colors and does the
//! nearest-color lookup. [`MSX_COLORS`] is the fixed 15-color MSX table.

mod error;
mod msx;
mod palette;

pub use error::PaletteError;
pub use msx::{MSX_COLORS, MSX_PALETTE_SIZE};
pub use palette::Palette;

/// Upper bound on palette size. Output indices are stored as `u8`.
pub const MAX_PALETTE_SIZE: usize = 256;
