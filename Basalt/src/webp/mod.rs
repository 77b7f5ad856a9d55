//! WebP importer
//!
//! Single-image, single-level importer over the `image` crate's WebP decoder.
//! Animated files import their first frame only.

use image::{DynamicImage, ImageFormat as CodecFormat};

use crate::error::{Error, Result};
use crate::formats::pixel::PixelFormat;
use crate::importer::{ContainerBytes, ImageData2D, Importer, ImporterFeature, InputData};

/// Importer for `.webp` images
#[derive(Debug, Default)]
pub struct WebpImporter {
    data: Option<ContainerBytes>,
}

impl WebpImporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Tightly packed rows, bottom to top
fn into_image_data(image: DynamicImage) -> ImageData2D {
    let image = image.flipv();
    let size = [image.width(), image.height()];
    if image.color().has_alpha() {
        ImageData2D::new(PixelFormat::RGBA8Unorm, size, image.into_rgba8().into_raw())
    } else {
        ImageData2D::new(PixelFormat::RGB8Unorm, size, image.into_rgb8().into_raw())
    }
}

impl Importer for WebpImporter {
    fn features(&self) -> &'static [ImporterFeature] {
        &[ImporterFeature::OpenData]
    }

    fn is_opened(&self) -> bool {
        self.data.is_some()
    }

    fn close(&mut self) {
        self.data = None;
    }

    fn open_data(&mut self, data: InputData<'_>) -> Result<()> {
        self.close();
        if data.is_empty() {
            return Err(Error::EmptyFile);
        }
        // Fail on open rather than on first import
        image::guess_format(data.as_slice())
            .ok()
            .filter(|format| *format == CodecFormat::WebP)
            .ok_or(Error::InvalidHeader)?;
        self.data = Some(data.into_bytes());
        Ok(())
    }

    fn image2d_count(&self) -> u32 {
        u32::from(self.data.is_some())
    }

    fn image2d_level_count(&self, id: u32) -> u32 {
        assert!(self.data.is_some(), "WebpImporter: no file opened");
        assert!(id == 0, "WebpImporter: image {id} out of range");
        1
    }

    fn image2d(&mut self, id: u32, level: u32) -> Result<ImageData2D> {
        let data = self.data.as_ref().ok_or(Error::NotOpened)?;
        assert!(id == 0 && level == 0, "WebpImporter: image {id} level {level} out of range");

        let decoded = image::load_from_memory_with_format(data, CodecFormat::WebP)?;
        tracing::debug!(
            "Decoded WebP {}x{} ({:?})",
            decoded.width(),
            decoded.height(),
            decoded.color()
        );
        Ok(into_image_data(decoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::webp::WebPEncoder;
    use image::{ExtendedColorType, ImageEncoder};
    use pretty_assertions::assert_eq;

    /// Lossless WebP, rows given top to bottom
    fn encode(pixels: &[u8], width: u32, height: u32, color: ExtendedColorType) -> Vec<u8> {
        let mut out = Vec::new();
        WebPEncoder::new_lossless(&mut out)
            .write_image(pixels, width, height, color)
            .unwrap();
        out
    }

    #[test]
    fn test_empty_and_garbage() {
        let mut importer = WebpImporter::new();
        assert!(matches!(importer.open_data(Vec::new().into()), Err(Error::EmptyFile)));
        assert!(matches!(
            importer.open_data(InputData::Borrowed(b"not a webp file")),
            Err(Error::InvalidHeader)
        ));
        assert!(!importer.is_opened());
        assert_eq!(importer.image2d_count(), 0);
    }

    #[test]
    fn test_rgb_rows_bottom_up() {
        // Top row red, bottom row green
        let pixels = [255, 0, 0, 255, 0, 0, 0, 255, 0, 0, 255, 0];
        let mut importer = WebpImporter::new();
        importer
            .open_data(encode(&pixels, 2, 2, ExtendedColorType::Rgb8).into())
            .unwrap();
        assert_eq!(importer.image2d_count(), 1);
        assert_eq!(importer.image2d_level_count(0), 1);

        let image = importer.image2d(0, 0).unwrap();
        assert_eq!(image.format(), PixelFormat::RGB8Unorm.into());
        assert_eq!(image.size(), [2, 2]);
        assert_eq!(&image.data()[..3], &[0, 255, 0]);
        assert_eq!(&image.data()[6..9], &[255, 0, 0]);
    }

    #[test]
    fn test_alpha_gives_rgba() {
        let pixels = [10, 20, 30, 128];
        let mut importer = WebpImporter::new();
        importer
            .open_data(encode(&pixels, 1, 1, ExtendedColorType::Rgba8).into())
            .unwrap();
        let image = importer.image2d(0, 0).unwrap();
        assert_eq!(image.format(), PixelFormat::RGBA8Unorm.into());
        assert_eq!(image.data(), &pixels);

        importer.close();
        assert!(matches!(importer.image2d(0, 0), Err(Error::NotOpened)));
    }
}
