//! PNG image converter
//!
//! Encodes an uncompressed [`ImageView2D`] to PNG with the `image` crate.
//! Images are stored bottom row first in memory, so rows are written in
//! reverse to produce a top-down PNG.

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::advisory::Advisory;
use crate::error::{Error, Result};
use crate::formats::pixel::{ImageFormat, PixelFormat};
use crate::importer::ImageView2D;

/// Capabilities an image converter advertises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageConverterFeature {
    /// Can convert a 2D image to an in-memory file
    Convert2DToData,
}

/// Common interface of image converters
pub trait ImageConverter {
    fn features(&self) -> &'static [ImageConverterFeature];

    /// File extension without the dot
    fn extension(&self) -> &'static str;

    fn mime_type(&self) -> &'static str;

    /// Encode an image into file contents
    fn convert_to_data(&self, image: &ImageView2D<'_>) -> Result<Vec<u8>>;

    /// Encode an image and write it to `path`
    fn convert_to_file(&self, image: &ImageView2D<'_>, path: &Path) -> Result<()> {
        let data = self.convert_to_data(image)?;
        std::fs::write(path, &data)?;
        tracing::debug!("Wrote {} ({} bytes)", path.display(), data.len());
        Ok(())
    }
}

/// PNG encoder for 8- and 16-bit unsigned normalized images
#[derive(Debug, Clone, Copy, Default)]
pub struct PngImageConverter {
    quiet: bool,
}

impl PngImageConverter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress advisories
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

/// PNG color type for a pixel format, `None` if PNG cannot store it
fn color_type(format: PixelFormat) -> Option<ExtendedColorType> {
    Some(match format {
        PixelFormat::R8Unorm => ExtendedColorType::L8,
        PixelFormat::R16Unorm => ExtendedColorType::L16,
        PixelFormat::RG8Unorm => ExtendedColorType::La8,
        PixelFormat::RG16Unorm => ExtendedColorType::La16,
        PixelFormat::RGB8Unorm => ExtendedColorType::Rgb8,
        PixelFormat::RGB16Unorm => ExtendedColorType::Rgb16,
        PixelFormat::RGBA8Unorm => ExtendedColorType::Rgba8,
        PixelFormat::RGBA16Unorm => ExtendedColorType::Rgba16,
        _ => return None,
    })
}

impl ImageConverter for PngImageConverter {
    fn features(&self) -> &'static [ImageConverterFeature] {
        &[ImageConverterFeature::Convert2DToData]
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }

    fn convert_to_data(&self, image: &ImageView2D<'_>) -> Result<Vec<u8>> {
        if image.flags.array && !self.quiet {
            Advisory::ArrayFlattened { format: "PNG" }.emit("PngImageConverter::convert_to_data()");
        }

        let format = match image.format {
            ImageFormat::Uncompressed(format) => format,
            compressed @ ImageFormat::Compressed(_) => {
                return Err(Error::CompressedInput(compressed));
            }
        };
        let color = color_type(format).ok_or(Error::UnsupportedPixelFormat(format))?;
        image.validate()?;

        let [width, height] = image.size;
        let stride = format.pixel_size() * width as usize;
        let mut flipped = Vec::with_capacity(stride * height as usize);
        for row in image.data[..stride * height as usize].chunks_exact(stride.max(1)).rev() {
            flipped.extend_from_slice(row);
        }

        // 16-bit samples stay native-endian here, the encoder writes them big-endian
        let mut output = Vec::new();
        PngEncoder::new(&mut output).write_image(&flipped, width, height, color)?;
        Ok(output)
    }
}
