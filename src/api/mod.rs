pub mod convert;
pub mod palette;

pub use convert::{handle_convert, ConvertQuery};
pub use palette::{handle_palette, PaletteColor, PaletteResponse};
