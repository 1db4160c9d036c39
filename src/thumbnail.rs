use iced::widget::image::Handle;
use image::imageops::FilterType;

/// Size of grid thumbnails (square)
const THUMBNAIL_SIZE: u32 = 256;

/// Decode downloaded image bytes into a square grid thumbnail.
/// Returns None if the bytes are not a decodable image.
pub fn square_thumbnail(bytes: &[u8]) -> Option<Handle> {
    let (width, height, rgba) = square_rgba(bytes, THUMBNAIL_SIZE)?;
    Some(Handle::from_rgba(width, height, rgba))
}

/// Decode and center-crop to a square of the given size.
///
/// `resize_to_fill` scales to cover the square and crops the overflow, which
/// matches how the grid cells display images (cover, not letterbox).
fn square_rgba(bytes: &[u8], size: u32) -> Option<(u32, u32, Vec<u8>)> {
    let decoded = image::load_from_memory(bytes).ok()?;
    let square = decoded.resize_to_fill(size, size, FilterType::Lanczos3);
    let rgba = square.to_rgba8();
    Some((rgba.width(), rgba.height(), rgba.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let buffer = ImageBuffer::from_pixel(width, height, Rgba([10u8, 20, 30, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(buffer)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_wide_image_is_cropped_square() {
        let bytes = png_bytes(64, 32);
        let (width, height, rgba) = square_rgba(&bytes, 16).unwrap();
        assert_eq!((width, height), (16, 16));
        assert_eq!(rgba.len(), 16 * 16 * 4);
    }

    #[test]
    fn test_tall_image_is_cropped_square() {
        let bytes = png_bytes(32, 64);
        let (width, height, _) = square_rgba(&bytes, 16).unwrap();
        assert_eq!((width, height), (16, 16));
    }

    #[test]
    fn test_garbage_bytes_yield_none() {
        assert!(square_rgba(b"definitely not an image", 16).is_none());
    }
}
