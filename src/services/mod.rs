pub mod converter;

pub use converter::{ConversionService, ConvertOptions, ConvertedSprite};
