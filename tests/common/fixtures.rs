//! Test fixtures: small image files built in memory.

use msx_quant::Bitmap;
use msx_sprite::rendering::decode_image;

/// Encode 8-bit pixel data as a PNG
fn encode(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("Failed to write PNG header");
        writer
            .write_image_data(data)
            .expect("Failed to write PNG data");
    }
    out
}

/// Opaque single-color RGB image
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let data: Vec<u8> = (0..width * height).flat_map(|_| rgb).collect();
    encode(width, height, png::ColorType::Rgb, &data)
}

/// RGBA image from a per-pixel function
pub fn rgba_png(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
    let data: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .flat_map(|(x, y)| f(x, y))
        .collect();
    encode(width, height, png::ColorType::Rgba, &data)
}

/// Black and white checkerboard with square cells of `cell` pixels
pub fn checker_png(width: u32, height: u32, cell: u32) -> Vec<u8> {
    rgba_png(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            [0, 0, 0, 255]
        } else {
            [255, 255, 255, 255]
        }
    })
}

/// 8-bit grayscale image
pub fn gray_png(width: u32, height: u32, level: u8) -> Vec<u8> {
    let data = vec![level; (width * height) as usize];
    encode(width, height, png::ColorType::Grayscale, &data)
}

/// Solid RGB image in any format the `image` crate can write
pub fn solid_image(format: image::ImageFormat, width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, format)
        .expect("Failed to encode fixture image");
    out.into_inner()
}

/// Decode a response body back into RGBA pixels
pub fn decode(bytes: &[u8]) -> Bitmap {
    decode_image(bytes, u64::MAX).expect("Response is not a decodable PNG")
}

/// MSX colors used in assertions, as RGBA
pub mod colors {
    pub const BLACK: [u8; 4] = [0, 0, 0, 255];
    pub const DARK_RED: [u8; 4] = [185, 94, 74, 255];
    pub const GRAY: [u8; 4] = [204, 204, 204, 255];
    pub const WHITE: [u8; 4] = [255, 255, 255, 255];
}
