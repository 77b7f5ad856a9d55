//! Pixel format tags carried by imported images.
//!
//! Uncompressed formats describe a per-pixel packing, compressed formats a
//! fixed-size block packing. [`ImageFormat`] tags an image with one or the
//! other.

/// Uncompressed pixel formats.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    R8Unorm,
    RG8Unorm,
    RGB8Unorm,
    RGBA8Unorm,
    R16Unorm,
    RG16Unorm,
    RGB16Unorm,
    RGBA16Unorm,
    RGB8Srgb,
    RGBA8Srgb,
    R32F,
    RGBA32F,
}

impl PixelFormat {
    /// Size of one pixel in bytes
    #[must_use]
    pub const fn pixel_size(self) -> usize {
        match self {
            Self::R8Unorm => 1,
            Self::RG8Unorm | Self::R16Unorm => 2,
            Self::RGB8Unorm | Self::RGB8Srgb => 3,
            Self::RGBA8Unorm | Self::RGBA8Srgb | Self::RG16Unorm | Self::R32F => 4,
            Self::RGB16Unorm => 6,
            Self::RGBA16Unorm => 8,
            Self::RGBA32F => 16,
        }
    }

    /// Number of channels
    #[must_use]
    pub const fn channel_count(self) -> usize {
        match self {
            Self::R8Unorm | Self::R16Unorm | Self::R32F => 1,
            Self::RG8Unorm | Self::RG16Unorm => 2,
            Self::RGB8Unorm | Self::RGB16Unorm | Self::RGB8Srgb => 3,
            Self::RGBA8Unorm | Self::RGBA16Unorm | Self::RGBA8Srgb | Self::RGBA32F => 4,
        }
    }

    /// Whether color channels are sRGB-encoded
    #[must_use]
    pub const fn is_srgb(self) -> bool {
        matches!(self, Self::RGB8Srgb | Self::RGBA8Srgb)
    }
}

/// Block-compressed pixel formats.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressedPixelFormat {
    Etc2RGB8Unorm,
    Etc2RGB8Srgb,
    Etc2RGBA8Unorm,
    Etc2RGBA8Srgb,
    EacR11Unorm,
    EacRG11Unorm,
    Bc1RGBUnorm,
    Bc1RGBSrgb,
    Bc3RGBAUnorm,
    Bc3RGBASrgb,
    Bc4RUnorm,
    Bc5RGUnorm,
    Bc7RGBAUnorm,
    Bc7RGBASrgb,
    PvrtcRGB4bppUnorm,
    PvrtcRGB4bppSrgb,
    PvrtcRGBA4bppUnorm,
    PvrtcRGBA4bppSrgb,
    Astc4x4RGBAUnorm,
    Astc4x4RGBASrgb,
}

impl CompressedPixelFormat {
    /// Block dimensions in pixels (width, height)
    #[must_use]
    pub const fn block_size(self) -> (u32, u32) {
        // Every format produced by the transcoder uses 4x4 blocks, PVRTC 4bpp included.
        (4, 4)
    }

    /// Size of one encoded block in bytes
    #[must_use]
    pub const fn block_data_size(self) -> usize {
        match self {
            Self::Etc2RGB8Unorm
            | Self::Etc2RGB8Srgb
            | Self::EacR11Unorm
            | Self::Bc1RGBUnorm
            | Self::Bc1RGBSrgb
            | Self::Bc4RUnorm
            | Self::PvrtcRGB4bppUnorm
            | Self::PvrtcRGB4bppSrgb
            | Self::PvrtcRGBA4bppUnorm
            | Self::PvrtcRGBA4bppSrgb => 8,
            Self::Etc2RGBA8Unorm
            | Self::Etc2RGBA8Srgb
            | Self::EacRG11Unorm
            | Self::Bc3RGBAUnorm
            | Self::Bc3RGBASrgb
            | Self::Bc5RGUnorm
            | Self::Bc7RGBAUnorm
            | Self::Bc7RGBASrgb
            | Self::Astc4x4RGBAUnorm
            | Self::Astc4x4RGBASrgb => 16,
        }
    }

    /// Whether color channels are sRGB-encoded
    #[must_use]
    pub const fn is_srgb(self) -> bool {
        matches!(
            self,
            Self::Etc2RGB8Srgb
                | Self::Etc2RGBA8Srgb
                | Self::Bc1RGBSrgb
                | Self::Bc3RGBASrgb
                | Self::Bc7RGBASrgb
                | Self::PvrtcRGB4bppSrgb
                | Self::PvrtcRGBA4bppSrgb
                | Self::Astc4x4RGBASrgb
        )
    }

    /// Number of blocks covering a `width` x `height` image
    #[must_use]
    pub const fn block_count(self, width: u32, height: u32) -> usize {
        let (bw, bh) = self.block_size();
        (width.div_ceil(bw) as usize) * (height.div_ceil(bh) as usize)
    }
}

/// Format tag of an image: either per-pixel or per-block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Uncompressed(PixelFormat),
    Compressed(CompressedPixelFormat),
}

impl ImageFormat {
    #[must_use]
    pub const fn is_compressed(self) -> bool {
        matches!(self, Self::Compressed(_))
    }

    /// Expected data length for an image of the given size
    #[must_use]
    pub const fn data_size(self, width: u32, height: u32) -> usize {
        match self {
            Self::Uncompressed(format) => format.pixel_size() * width as usize * height as usize,
            Self::Compressed(format) => format.block_data_size() * format.block_count(width, height),
        }
    }
}

impl From<PixelFormat> for ImageFormat {
    fn from(format: PixelFormat) -> Self {
        Self::Uncompressed(format)
    }
}

impl From<CompressedPixelFormat> for ImageFormat {
    fn from(format: CompressedPixelFormat) -> Self {
        Self::Compressed(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_count_rounds_up() {
        let format = CompressedPixelFormat::Bc1RGBUnorm;
        assert_eq!(format.block_count(4, 4), 1);
        assert_eq!(format.block_count(5, 4), 2);
        assert_eq!(format.block_count(13, 7), 8);
    }

    #[test]
    fn test_data_size() {
        let rgba = ImageFormat::from(PixelFormat::RGBA8Unorm);
        assert_eq!(rgba.data_size(3, 2), 24);

        let bc3 = ImageFormat::from(CompressedPixelFormat::Bc3RGBASrgb);
        assert_eq!(bc3.data_size(8, 8), 64);
        assert!(bc3.is_compressed());
    }
}
