use crate::error::SpriteError;
use image::ImageReader;
use msx_quant::{Bitmap, SpriteImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// PNG layout for converted sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Color type 3 with a PLTE chunk holding the palette
    #[default]
    Indexed,
    /// 8-bit RGBA, alpha always 255
    Rgba,
}

/// Decode an uploaded image into an RGBA bitmap.
///
/// The format is detected from the content, not a file name: PNG, JPEG,
/// GIF (first frame), BMP and WebP are accepted. Every color type and bit
/// depth is converted to 8-bit RGBA, with missing alpha set to 255. Images
/// with more than `max_pixels` pixels are rejected from their header, before
/// the pixel buffer is allocated.
pub fn decode_image(bytes: &[u8], max_pixels: u64) -> Result<Bitmap, SpriteError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| SpriteError::Decode(e.to_string()))?;
    let format = reader
        .format()
        .ok_or_else(|| SpriteError::Decode("unrecognized image format".to_string()))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| SpriteError::Decode(e.to_string()))?;
    let pixels = width as u64 * height as u64;
    if pixels > max_pixels {
        return Err(SpriteError::SourceTooLarge {
            pixels,
            max: max_pixels,
        });
    }

    let rgba = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| SpriteError::Decode(e.to_string()))?
        .into_rgba8();
    let (width, height) = rgba.dimensions();

    Bitmap::new(width, height, rgba.into_raw()).map_err(|e| SpriteError::Decode(e.to_string()))
}

/// Encode a converted sprite as PNG.
///
/// With `optimize`, the encoded file is re-compressed with oxipng; if that
/// fails the fast-encoded bytes are returned instead.
pub fn encode_sprite_png(
    sprite: &SpriteImage,
    format: OutputFormat,
    optimize: bool,
) -> Result<Vec<u8>, SpriteError> {
    let (color_type, bit_depth, plte, data) = match format {
        OutputFormat::Indexed => {
            let palette = sprite.palette();
            let (depth, bits) = match palette.len() {
                0..=2 => (png::BitDepth::One, 1),
                3..=4 => (png::BitDepth::Two, 2),
                5..=16 => (png::BitDepth::Four, 4),
                _ => (png::BitDepth::Eight, 8),
            };
            let plte: Vec<u8> = palette
                .entries()
                .iter()
                .flat_map(|c| c.rgb().to_bytes())
                .collect();
            let packed = if bits == 8 {
                sprite.indices().to_vec()
            } else {
                pack_nbits(sprite.indices(), sprite.width(), bits)
            };
            (png::ColorType::Indexed, depth, Some(plte), packed)
        }
        OutputFormat::Rgba => (
            png::ColorType::Rgba,
            png::BitDepth::Eight,
            None,
            sprite.to_rgba(),
        ),
    };

    // Fast settings: oxipng re-compresses when enabled
    let png_bytes = encode_png(
        sprite.width(),
        sprite.height(),
        color_type,
        bit_depth,
        plte.as_deref(),
        &data,
    )?;

    if !optimize {
        return Ok(png_bytes);
    }

    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => Ok(optimized),
        Err(e) => {
            tracing::debug!(%e, "oxipng failed, keeping unoptimized PNG");
            Ok(png_bytes)
        }
    }
}

/// Encode packed pixel data as a PNG.
fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, SpriteError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| SpriteError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| SpriteError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Pack palette indices into N-bit PNG row data (1, 2, or 4 bits per pixel).
/// Each row starts on a byte boundary.
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = indices.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width as usize) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}

#[cfg(test)]
mod tests {
    use super::*;
    use msx_quant::{Palette, Rgb, SpriteConverter};

    const MAX_PIXELS: u64 = 1 << 20;

    fn encode_raw(width: u32, height: u32, color_type: png::ColorType, data: &[u8]) -> Vec<u8> {
        encode_png(width, height, color_type, png::BitDepth::Eight, None, data).unwrap()
    }

    #[test]
    fn test_pack_4bit_odd_width() {
        // 3 pixels per row -> 2 bytes per row, low nibble of the last byte unused
        let packed = pack_nbits(&[1, 2, 3, 14, 0, 5], 3, 4);
        assert_eq!(packed, vec![0x12, 0x30, 0xE0, 0x50]);
    }

    #[test]
    fn test_pack_1bit() {
        let packed = pack_nbits(&[1, 0, 1, 1, 0, 0, 0, 1, 1], 9, 1);
        assert_eq!(packed, vec![0b1011_0001, 0b1000_0000]);
    }

    #[test]
    fn test_decode_rgba_roundtrip() {
        let data = [10, 20, 30, 40, 50, 60, 70, 80];
        let png = encode_raw(2, 1, png::ColorType::Rgba, &data);
        let bitmap = decode_image(&png, MAX_PIXELS).unwrap();
        assert_eq!(bitmap.as_raw(), &data);
    }

    #[test]
    fn test_decode_rgb_adds_opaque_alpha() {
        let png = encode_raw(2, 1, png::ColorType::Rgb, &[1, 2, 3, 4, 5, 6]);
        let bitmap = decode_image(&png, MAX_PIXELS).unwrap();
        assert_eq!(bitmap.as_raw(), &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_decode_grayscale_expands() {
        let png = encode_raw(2, 1, png::ColorType::Grayscale, &[0, 200]);
        let bitmap = decode_image(&png, MAX_PIXELS).unwrap();
        assert_eq!(bitmap.as_raw(), &[0, 0, 0, 255, 200, 200, 200, 255]);

        let png = encode_raw(1, 1, png::ColorType::GrayscaleAlpha, &[90, 7]);
        let bitmap = decode_image(&png, MAX_PIXELS).unwrap();
        assert_eq!(bitmap.as_raw(), &[90, 90, 90, 7]);
    }

    /// Encode a solid RGB image with the `image` crate in another format.
    fn encode_other(format: image::ImageFormat, width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, format)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_bmp_exactly() {
        let bytes = encode_other(image::ImageFormat::Bmp, 3, 2, [255, 0, 0]);
        let bitmap = decode_image(&bytes, MAX_PIXELS).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (3, 2));
        assert!(bitmap.pixels().all(|p| p == [255, 0, 0, 255]));
    }

    #[test]
    fn test_decode_gif_and_jpeg() {
        // Both encoders may shift colors slightly; white stays near white
        for format in [image::ImageFormat::Gif, image::ImageFormat::Jpeg] {
            let bytes = encode_other(format, 16, 8, [255, 255, 255]);
            let bitmap = decode_image(&bytes, MAX_PIXELS).unwrap();
            assert_eq!((bitmap.width(), bitmap.height()), (16, 8), "{format:?}");
            assert!(
                bitmap
                    .pixels()
                    .all(|p| p[0] > 240 && p[1] > 240 && p[2] > 240 && p[3] == 255),
                "{format:?} decoded to {:?}",
                bitmap.pixel(0, 0)
            );
        }
    }

    #[test]
    fn test_decode_rejects_oversized_jpeg_from_header() {
        let bytes = encode_other(image::ImageFormat::Jpeg, 10, 10, [0, 0, 0]);
        assert!(matches!(
            decode_image(&bytes, 99),
            Err(SpriteError::SourceTooLarge { pixels: 100, max: 99 })
        ));
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let result = decode_image(b"definitely not an image", MAX_PIXELS);
        assert!(matches!(result, Err(SpriteError::Decode(_))));

        let result = decode_image(&[], MAX_PIXELS);
        assert!(matches!(result, Err(SpriteError::Decode(_))));
    }

    #[test]
    fn test_decode_truncated_png_is_decode_error() {
        let png = encode_raw(8, 8, png::ColorType::Rgba, &[128; 256]);
        let result = decode_image(&png[..png.len() / 2], MAX_PIXELS);
        assert!(matches!(result, Err(SpriteError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_oversized_source() {
        let png = encode_raw(4, 4, png::ColorType::Rgba, &[0; 64]);
        let result = decode_image(&png, 15);
        assert!(matches!(
            result,
            Err(SpriteError::SourceTooLarge { pixels: 16, max: 15 })
        ));
    }

    #[test]
    fn test_encode_indexed_uses_4bit_plte() {
        let sprite = SpriteImage::new(vec![0, 5, 14, 3], 2, 2, Palette::msx());
        let png = encode_sprite_png(&sprite, OutputFormat::Indexed, false).unwrap();

        let decoder = png::Decoder::new(Cursor::new(&png));
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!(info.color_type, png::ColorType::Indexed);
        assert_eq!(info.bit_depth, png::BitDepth::Four);
        let plte = info.palette.as_ref().expect("PLTE chunk");
        assert_eq!(plte.len(), 15 * 3);
        assert_eq!(&plte[15..18], &[185, 94, 74]);
    }

    #[test]
    fn test_encode_indexed_decodes_to_sprite_colors() {
        let sprite = SpriteImage::new(vec![0, 5, 14, 3, 7, 1], 3, 2, Palette::msx());
        for optimize in [false, true] {
            let png = encode_sprite_png(&sprite, OutputFormat::Indexed, optimize).unwrap();
            let bitmap = decode_image(&png, MAX_PIXELS).unwrap();
            assert_eq!(bitmap.as_raw(), sprite.to_rgba().as_slice());
        }
    }

    #[test]
    fn test_encode_rgba_is_opaque() {
        let sprite = SpriteImage::new(vec![8, 9], 2, 1, Palette::msx());
        let png = encode_sprite_png(&sprite, OutputFormat::Rgba, false).unwrap();

        let reader = png::Decoder::new(Cursor::new(&png)).read_info().unwrap();
        assert_eq!(reader.info().color_type, png::ColorType::Rgba);

        let bitmap = decode_image(&png, MAX_PIXELS).unwrap();
        assert_eq!(bitmap.pixel(0, 0), [255, 137, 125, 255]);
        assert_eq!(bitmap.pixel(1, 0), [204, 195, 94, 255]);
    }

    #[test]
    fn test_encode_large_palette_uses_8bit() {
        let colors: Vec<Rgb> = (0..=255u8).map(|i| Rgb::new(i, 0, 0)).collect();
        let palette = Palette::new(&colors).unwrap();
        let sprite = SpriteImage::new(vec![0, 200, 255], 3, 1, palette);
        let png = encode_sprite_png(&sprite, OutputFormat::Indexed, false).unwrap();

        let reader = png::Decoder::new(Cursor::new(&png)).read_info().unwrap();
        assert_eq!(reader.info().bit_depth, png::BitDepth::Eight);
    }

    #[test]
    fn test_full_pipeline_through_codec() {
        let source = encode_raw(4, 4, png::ColorType::Rgba, &[255; 64]);
        let bitmap = decode_image(&source, MAX_PIXELS).unwrap();
        let sprite = SpriteConverter::msx().size(2, 2).convert(&bitmap).unwrap();
        let out = encode_sprite_png(&sprite, OutputFormat::Indexed, true).unwrap();

        let decoded = decode_image(&out, MAX_PIXELS).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2, 2));
        assert!(decoded.pixels().all(|p| p == [255, 255, 255, 255]));
    }
}
