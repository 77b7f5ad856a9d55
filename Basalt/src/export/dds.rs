//! DDS export of transcoded levels

use std::path::Path;

use ddsfile::{AlphaMode, D3D10ResourceDimension, Dds, DxgiFormat, NewDxgiParams};

use crate::error::{Error, Result};
use crate::formats::pixel::{CompressedPixelFormat, ImageFormat, PixelFormat};
use crate::importer::ImageData2D;

/// DXGI format storing `format` as-is, `None` if DDS has no match
#[must_use]
pub fn dxgi_format(format: ImageFormat) -> Option<DxgiFormat> {
    Some(match format {
        ImageFormat::Uncompressed(PixelFormat::RGBA8Unorm) => DxgiFormat::R8G8B8A8_UNorm,
        ImageFormat::Uncompressed(PixelFormat::RGBA8Srgb) => DxgiFormat::R8G8B8A8_UNorm_sRGB,
        ImageFormat::Compressed(CompressedPixelFormat::Bc1RGBUnorm) => DxgiFormat::BC1_UNorm,
        ImageFormat::Compressed(CompressedPixelFormat::Bc1RGBSrgb) => DxgiFormat::BC1_UNorm_sRGB,
        ImageFormat::Compressed(CompressedPixelFormat::Bc3RGBAUnorm) => DxgiFormat::BC3_UNorm,
        ImageFormat::Compressed(CompressedPixelFormat::Bc3RGBASrgb) => DxgiFormat::BC3_UNorm_sRGB,
        ImageFormat::Compressed(CompressedPixelFormat::Bc4RUnorm) => DxgiFormat::BC4_UNorm,
        ImageFormat::Compressed(CompressedPixelFormat::Bc5RGUnorm) => DxgiFormat::BC5_UNorm,
        ImageFormat::Compressed(CompressedPixelFormat::Bc7RGBAUnorm) => DxgiFormat::BC7_UNorm,
        ImageFormat::Compressed(CompressedPixelFormat::Bc7RGBASrgb) => DxgiFormat::BC7_UNorm_sRGB,
        _ => return None,
    })
}

/// Wrap one level in a single-mip DDS container
///
/// Rows keep their stored order, so the DDS is upside down relative to the
/// usual top-left origin when the source was Y-flipped.
pub fn image_to_dds_bytes(image: &ImageData2D) -> Result<Vec<u8>> {
    let format = dxgi_format(image.format()).ok_or(Error::UnsupportedExportFormat(image.format()))?;
    image.as_view().validate()?;

    let mut dds = Dds::new_dxgi(NewDxgiParams {
        height: image.height(),
        width: image.width(),
        depth: None,
        format,
        mipmap_levels: None,
        array_layers: None,
        caps2: None,
        is_cubemap: false,
        resource_dimension: D3D10ResourceDimension::Texture2D,
        alpha_mode: AlphaMode::Straight,
    })
    .map_err(|e| Error::DdsError(format!("Failed to create DDS: {e}")))?;

    let layer = dds
        .get_mut_data(0)
        .map_err(|e| Error::DdsError(format!("No DDS data layer: {e}")))?;
    let expected = layer.len();
    let source = image.data().get(..expected).ok_or(Error::ImageDataTooSmall {
        expected,
        actual: image.data().len(),
    })?;
    layer.copy_from_slice(source);

    let mut output = Vec::new();
    dds.write(&mut output)
        .map_err(|e| Error::DdsError(format!("Failed to write DDS: {e}")))?;
    Ok(output)
}

/// Write one level to a `.dds` file
pub fn write_dds(image: &ImageData2D, path: &Path) -> Result<()> {
    let bytes = image_to_dds_bytes(image)?;
    std::fs::write(path, &bytes)?;
    tracing::debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
