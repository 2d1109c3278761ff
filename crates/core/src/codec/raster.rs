use crate::raster::RasterImage;
use image::ImageFormat;
use satchel_plugin::{AssetDecoder, BoxError, ResourceEntry};

/// Decodes BMP, GIF, ICO, JPEG, PNG and TIFF through the `image` crate.
///
/// The format is picked from the extension when it is known, otherwise it is
/// guessed from the leading bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDecoder;

impl AssetDecoder<RasterImage> for ImageDecoder {
    fn decode(&self, entry: &ResourceEntry, bytes: &[u8]) -> Result<RasterImage, BoxError> {
        let decoded = match entry.extension().and_then(ImageFormat::from_extension) {
            Some(format) => image::load_from_memory_with_format(bytes, format)?,
            None => image::load_from_memory(bytes)?,
        };
        Ok(RasterImage::new(decoded))
    }

    fn name(&self) -> &str {
        "Image Decoder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let entry = ResourceEntry::virtual_entry("images/red.png");
        let image = ImageDecoder.decode(&entry, &png_bytes(20, 20)).unwrap();
        assert_eq!(image.dimensions(), (20, 20));
        assert_eq!(image.pixel(10, 10), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_decode_guesses_unknown_extension() {
        let entry = ResourceEntry::virtual_entry("images/red.img");
        let image = ImageDecoder.decode(&entry, &png_bytes(4, 2)).unwrap();
        assert_eq!(image.dimensions(), (4, 2));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let entry = ResourceEntry::virtual_entry("images/broken.png");
        assert!(ImageDecoder.decode(&entry, b"not an image").is_err());
    }
}
