pub mod codec;

pub use codec::{decode_image, encode_sprite_png, OutputFormat};
