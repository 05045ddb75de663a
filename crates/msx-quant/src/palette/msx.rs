//! The MSX1 (TMS9918) 15-color palette.
//!
//! Transparent (color 0 on the hardware) is not listed; output sprites are
//! always opaque. Order matters: it is the tie-break order of
//! [`Palette::find_nearest`](super::Palette::find_nearest).

use crate::color::{NamedColor, Rgb};

/// Number of entries in [`MSX_COLORS`].
pub const MSX_PALETTE_SIZE: usize = 15;

/// The fixed MSX palette, in matching order.
pub static MSX_COLORS: [NamedColor; MSX_PALETTE_SIZE] = [
    NamedColor::named("Black", Rgb::new(0, 0, 0)),
    NamedColor::named("Medium Green", Rgb::new(62, 184, 73)),
    NamedColor::named("Light Green", Rgb::new(116, 208, 125)),
    NamedColor::named("Dark Blue", Rgb::new(89, 85, 224)),
    NamedColor::named("Light Blue", Rgb::new(128, 118, 241)),
    NamedColor::named("Dark Red", Rgb::new(185, 94, 74)),
    NamedColor::named("Cyan", Rgb::new(101, 219, 239)),
    NamedColor::named("Medium Red", Rgb::new(217, 100, 89)),
    NamedColor::named("Light Red", Rgb::new(255, 137, 125)),
    NamedColor::named("Dark Yellow", Rgb::new(204, 195, 94)),
    NamedColor::named("Light Yellow", Rgb::new(221, 216, 139)),
    NamedColor::named("Dark Green", Rgb::new(58, 162, 65)),
    NamedColor::named("Magenta", Rgb::new(183, 102, 181)),
    NamedColor::named("Gray", Rgb::new(204, 204, 204)),
    NamedColor::named("White", Rgb::new(255, 255, 255)),
];
