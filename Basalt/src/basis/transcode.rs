//! Per-level transcode pipeline
//!
//! Given an opened session and a resolved target format, computes the output
//! geometry of one level, allocates exactly the bytes the engine will write
//! and wraps the result as an [`ImageData2D`].

use super::engine::{DecodeFlags, LevelDesc, TranscodeRequest, Transcoder};
use crate::advisory::Advisory;
use crate::error::{Error, Result};
use crate::formats::target::TargetFormat;
use crate::importer::ImageData2D;

/// Shape of the engine output for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputGeometry {
    /// Row pitch in pixels, `None` when the engine infers it
    pub row_stride: Option<u32>,
    /// Rows in pixels, `None` when the engine infers it
    pub output_rows: Option<u32>,
    /// Pixels (uncompressed) or blocks (compressed)
    pub unit_count: u32,
}

impl OutputGeometry {
    /// Geometry of `desc` when transcoded to `format`
    ///
    /// Uncompressed output is tightly packed, one row per `width` pixels.
    /// Compressed output covers every block of the level.
    #[must_use]
    pub fn for_level(format: TargetFormat, desc: &LevelDesc) -> Self {
        if format.is_compressed() {
            Self {
                row_stride: None,
                output_rows: None,
                unit_count: desc.total_blocks,
            }
        } else {
            Self {
                row_stride: Some(desc.width),
                output_rows: Some(desc.height),
                unit_count: desc.width * desc.height,
            }
        }
    }

    /// Exact output size in bytes
    #[must_use]
    pub fn byte_len(&self, format: TargetFormat) -> usize {
        self.unit_count as usize * format.bytes_per_block_or_pixel() as usize
    }
}

/// Everything the pipeline needs to know about one transcode call
#[derive(Debug, Clone, Copy)]
pub(crate) struct LevelJob {
    pub image: u32,
    pub level: u32,
    pub format: TargetFormat,
    pub is_srgb: bool,
    pub y_flipped: bool,
    pub decode_flags: DecodeFlags,
}

const CONTEXT: &str = "BasisImporter::image2d()";

/// Transcode one level
///
/// # Panics
/// Panics if the engine cannot describe an image or level that the opened
/// container reported. Callers check bounds first, so this is a defect.
pub(crate) fn transcode_level<T: Transcoder>(
    session: &T,
    data: &[u8],
    job: &LevelJob,
) -> Result<ImageData2D> {
    let Some(info) = session.image_info(data, job.image) else {
        panic!("{CONTEXT}: no info for image {}", job.image);
    };
    let Some(desc) = session.level_desc(data, job.image, job.level) else {
        panic!("{CONTEXT}: no description for image {} level {}", job.image, job.level);
    };
    tracing::trace!(
        "Image {} ({}x{}, {} levels), level {}: {}x{}",
        job.image,
        info.width,
        info.height,
        info.level_count,
        job.level,
        desc.width,
        desc.height
    );

    if !job.y_flipped {
        Advisory::NotYFlipped.emit(CONTEXT);
    }

    let geometry = OutputGeometry::for_level(job.format, &desc);
    let mut output = vec![0u8; geometry.byte_len(job.format)];
    let request = TranscodeRequest {
        image: job.image,
        level: job.level,
        format: job.format,
        row_stride: geometry.row_stride,
        output_rows: geometry.output_rows,
        unit_count: geometry.unit_count,
        decode_flags: job.decode_flags,
    };

    session
        .transcode_level(data, &request, &mut output)
        .map_err(|source| {
            tracing::debug!(
                "Transcoding image {} level {} to {} failed: {source}",
                job.image,
                job.level,
                job.format
            );
            Error::TranscodeFailed {
                image: job.image,
                level: job.level,
                source,
            }
        })?;

    tracing::debug!(
        "Transcoded image {} level {} to {} ({} bytes)",
        job.image,
        job.level,
        job.format,
        output.len()
    );
    Ok(ImageData2D::with_format(
        job.format.resolve(job.is_srgb),
        [desc.width, desc.height],
        output,
    ))
}
