//! Image results produced by importers and consumed by converters

use crate::error::{Error, Result};
use crate::formats::pixel::{CompressedPixelFormat, ImageFormat, PixelFormat};

/// Extra properties of a 2D image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageFlags {
    /// The second dimension indexes layers of a 1D array, not rows
    pub array: bool,
}

/// An imported 2D image owning its data
///
/// Uncompressed data is tightly packed, rows bottom to top. Compressed data
/// is in the canonical block order of its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData2D {
    format: ImageFormat,
    size: [u32; 2],
    data: Vec<u8>,
    flags: ImageFlags,
}

impl ImageData2D {
    /// Wrap uncompressed pixel data
    #[must_use]
    pub fn new(format: PixelFormat, size: [u32; 2], data: Vec<u8>) -> Self {
        Self {
            format: ImageFormat::Uncompressed(format),
            size,
            data,
            flags: ImageFlags::default(),
        }
    }

    /// Wrap block-compressed data
    #[must_use]
    pub fn new_compressed(format: CompressedPixelFormat, size: [u32; 2], data: Vec<u8>) -> Self {
        Self {
            format: ImageFormat::Compressed(format),
            size,
            data,
            flags: ImageFlags::default(),
        }
    }

    /// Wrap data tagged with an already resolved format
    #[must_use]
    pub fn with_format(format: ImageFormat, size: [u32; 2], data: Vec<u8>) -> Self {
        Self {
            format,
            size,
            data,
            flags: ImageFlags::default(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ImageFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    #[must_use]
    pub fn is_compressed(&self) -> bool {
        self.format.is_compressed()
    }

    #[must_use]
    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.size[0]
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.size[1]
    }

    #[must_use]
    pub fn flags(&self) -> ImageFlags {
        self.flags
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Borrow as a view for converters
    #[must_use]
    pub fn as_view(&self) -> ImageView2D<'_> {
        ImageView2D {
            format: self.format,
            size: self.size,
            data: &self.data,
            flags: self.flags,
        }
    }
}

/// A borrowed 2D image
#[derive(Debug, Clone, Copy)]
pub struct ImageView2D<'a> {
    pub format: ImageFormat,
    pub size: [u32; 2],
    pub data: &'a [u8],
    pub flags: ImageFlags,
}

impl<'a> ImageView2D<'a> {
    /// View over tightly packed pixel data
    #[must_use]
    pub fn new(format: PixelFormat, size: [u32; 2], data: &'a [u8]) -> Self {
        Self {
            format: ImageFormat::Uncompressed(format),
            size,
            data,
            flags: ImageFlags::default(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ImageFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Bytes per row for uncompressed data, `None` for compressed
    #[must_use]
    pub fn row_stride(&self) -> Option<usize> {
        match self.format {
            ImageFormat::Uncompressed(format) => Some(format.pixel_size() * self.size[0] as usize),
            ImageFormat::Compressed(_) => None,
        }
    }

    /// Check the data is large enough for the declared format and size
    pub fn validate(&self) -> Result<()> {
        let expected = self.format.data_size(self.size[0], self.size[1]);
        if self.data.len() < expected {
            return Err(Error::ImageDataTooSmall {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_validation() {
        let data = vec![0u8; 2 * 2 * 3];
        let view = ImageView2D::new(PixelFormat::RGB8Unorm, [2, 2], &data);
        assert_eq!(view.row_stride(), Some(6));
        assert!(view.validate().is_ok());

        let short = ImageView2D::new(PixelFormat::RGBA8Unorm, [2, 2], &data);
        assert!(matches!(
            short.validate(),
            Err(Error::ImageDataTooSmall { expected: 16, actual: 12 })
        ));
    }

    #[test]
    fn test_compressed_view_has_no_row_stride() {
        let image = ImageData2D::new_compressed(CompressedPixelFormat::Bc1RGBUnorm, [8, 4], vec![0; 16]);
        assert!(image.is_compressed());
        assert_eq!(image.as_view().row_stride(), None);
        assert!(image.as_view().validate().is_ok());
    }
}
