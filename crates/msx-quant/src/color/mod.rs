//! Color types
//!
//! - [`Rgb`]: a raw 8-bit RGB triple, the unit of palette matching.
//! - [`NamedColor`]: an [`Rgb`] with an optional display name, the unit of
//!   palette storage.
//!
//! # Example
//!
//! ```
//! use msx_quant::{NamedColor, Rgb};
//!
//! let white = NamedColor::named("White", Rgb::new(255, 255, 255));
//! assert_eq!(white.to_string(), "White - RGB(255, 255, 255)");
//! ```

mod named;
mod rgb;

pub use named::NamedColor;
pub use rgb::Rgb;
