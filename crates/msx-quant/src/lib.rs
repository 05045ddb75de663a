//! msx-quant: MSX-palette sprite conversion
//!
//! This library turns an arbitrary RGBA image into a small, hard-edged
//! sprite whose every pixel is one of the 15 MSX colors. It is pure and
//! synchronous: no I/O, no global mutable state, and every function can be
//! called concurrently on independent inputs.
//!
//! # Quick Start
//!
//! The [`SpriteConverter`] builder is the primary entry point:
//!
//! ```
//! use msx_quant::{Bitmap, SpriteConverter};
//!
//! let source = Bitmap::filled(4, 4, [255, 255, 255, 255]).unwrap();
//!
//! let converter = SpriteConverter::msx().size(2, 2);
//! let sprite = converter.convert(&source).unwrap();
//!
//! assert_eq!(sprite.width(), 2);
//! assert_eq!(sprite.height(), 2);
//! assert!(sprite.to_bitmap().pixels().all(|p| p == [255, 255, 255, 255]));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Bitmap (any size, RGBA8)
//!     |
//!     v
//! resample_nearest()     one source pixel per destination pixel
//!     |
//!     v
//! Quantizer              nearest palette entry per pixel, alpha -> 255
//!     |
//!     v
//! SpriteImage            palette indices + palette
//! ```
//!
//! The stages always run in this order. Quantizing last guarantees that the
//! output contains palette colors only.
//!
//! # Color Matching
//!
//! Distance is plain squared Euclidean distance on the 8-bit channels:
//!
//! ```text
//! d = (r - pr)^2 + (g - pg)^2 + (b - pb)^2
//! ```
//!
//! The palette is scanned in order and the current best is only replaced on
//! a strictly smaller distance, so equidistant colors resolve to the entry
//! with the lowest index. The exact output bytes for boundary colors depend
//! on this rule.
//!
//! | Input | Result | Distance |
//! |-------|--------|----------|
//! | `(0, 0, 0)` | Black `(0, 0, 0)` | 0 |
//! | `(255, 0, 0)` | Dark Red `(185, 94, 74)` | 19212 |
//! | | Medium Red `(217, 100, 89)`, runner-up | 19365 |
//! | | Light Red `(255, 137, 125)` | 34394 |
//! | `(255, 255, 255)` | White `(255, 255, 255)` | 0 |

pub mod api;
pub mod bitmap;
pub mod color;
pub mod output;
pub mod palette;
pub mod quantize;
pub mod resample;


pub use api::{convert_msx, ConvertError, SpriteConverter, DEFAULT_SPRITE_SIZE};
pub use bitmap::{Bitmap, BitmapError};
pub use color::{NamedColor, Rgb};
pub use output::SpriteImage;
pub use palette::{Palette, PaletteError, MSX_COLORS, MSX_PALETTE_SIZE};
pub use quantize::{quantize, Quantizer};
pub use resample::{resample_nearest, ResampleError};
