//! Output types for the conversion pipeline.
//!
//! [`SpriteImage`] stores palette indices with dimension metadata and an
//! owned [`Palette`](crate::palette::Palette). The indexed form is canonical;
//! RGBA output is computed on demand.

mod sprite_image;

pub use sprite_image::SpriteImage;
