//! RGBA8 previews of transcoded levels
//!
//! Block-compressed BC levels are decoded with `bcdec_rs`; uncompressed RGBA8
//! passes through. The result is always `RGBA8Unorm`, ready for PNG export.

use crate::error::{Error, Result};
use crate::formats::pixel::{CompressedPixelFormat, ImageFormat, PixelFormat};
use crate::importer::ImageData2D;

#[derive(Clone, Copy)]
enum BcFormat {
    Bc1,
    Bc3,
    Bc4,
    Bc5,
    Bc7,
}

impl BcFormat {
    fn from_compressed(format: CompressedPixelFormat) -> Option<Self> {
        Some(match format {
            CompressedPixelFormat::Bc1RGBUnorm | CompressedPixelFormat::Bc1RGBSrgb => Self::Bc1,
            CompressedPixelFormat::Bc3RGBAUnorm | CompressedPixelFormat::Bc3RGBASrgb => Self::Bc3,
            CompressedPixelFormat::Bc4RUnorm => Self::Bc4,
            CompressedPixelFormat::Bc5RGUnorm => Self::Bc5,
            CompressedPixelFormat::Bc7RGBAUnorm | CompressedPixelFormat::Bc7RGBASrgb => Self::Bc7,
            _ => return None,
        })
    }

    const fn block_size(self) -> usize {
        match self {
            Self::Bc1 | Self::Bc4 => 8,
            Self::Bc3 | Self::Bc5 | Self::Bc7 => 16,
        }
    }

    /// Decode one block into 16 RGBA pixels, row-major
    fn decode_block(self, block: &[u8], rgba: &mut [u8; 64]) {
        match self {
            Self::Bc1 => bcdec_rs::bc1(block, rgba, 16),
            Self::Bc3 => bcdec_rs::bc3(block, rgba, 16),
            Self::Bc7 => bcdec_rs::bc7(block, rgba, 16),
            // BC4 and BC5 decode to one and two bytes per pixel
            Self::Bc4 => {
                let mut red = [0u8; 16];
                bcdec_rs::bc4(block, &mut red, 4, false);
                for (pixel, r) in rgba.chunks_exact_mut(4).zip(red) {
                    pixel.copy_from_slice(&[r, r, r, 255]);
                }
            }
            Self::Bc5 => {
                let mut red_green = [0u8; 32];
                bcdec_rs::bc5(block, &mut red_green, 8, false);
                for (pixel, rg) in rgba.chunks_exact_mut(4).zip(red_green.chunks_exact(2)) {
                    pixel.copy_from_slice(&[rg[0], rg[1], 0, 255]);
                }
            }
        }
    }
}

fn decode_bc(data: &[u8], width: usize, height: usize, format: BcFormat) -> Result<Vec<u8>> {
    let blocks_x = width.div_ceil(4);
    let blocks_y = height.div_ceil(4);
    let block_size = format.block_size();
    let expected = blocks_x * blocks_y * block_size;
    if data.len() < expected {
        return Err(Error::ImageDataTooSmall {
            expected,
            actual: data.len(),
        });
    }

    let mut rgba = vec![0u8; width * height * 4];
    let mut block_rgba = [0u8; 64];
    for (index, block) in data[..expected].chunks_exact(block_size).enumerate() {
        let (bx, by) = (index % blocks_x, index / blocks_x);
        format.decode_block(block, &mut block_rgba);

        for py in 0..4 {
            let fy = by * 4 + py;
            if fy >= height {
                break;
            }
            let columns = 4.min(width - bx * 4);
            let src = py * 16;
            let dst = (fy * width + bx * 4) * 4;
            rgba[dst..dst + columns * 4].copy_from_slice(&block_rgba[src..src + columns * 4]);
        }
    }
    Ok(rgba)
}

/// Decode a level to `RGBA8Unorm`
///
/// sRGB data is relabeled, not converted.
pub fn decompress_to_rgba(image: &ImageData2D) -> Result<ImageData2D> {
    let (width, height) = (image.width(), image.height());
    let rgba = match image.format() {
        ImageFormat::Uncompressed(PixelFormat::RGBA8Unorm | PixelFormat::RGBA8Srgb) => {
            image.as_view().validate()?;
            image.data()[..width as usize * height as usize * 4].to_vec()
        }
        ImageFormat::Compressed(format) => {
            let bc = BcFormat::from_compressed(format)
                .ok_or(Error::UnsupportedExportFormat(image.format()))?;
            decode_bc(image.data(), width as usize, height as usize, bc)?
        }
        other @ ImageFormat::Uncompressed(_) => return Err(Error::UnsupportedExportFormat(other)),
    };
    Ok(ImageData2D::new(PixelFormat::RGBA8Unorm, [width, height], rgba).with_flags(image.flags()))
}
