//! The transcoding engine seam
//!
//! A [`Transcoder`] is one engine session. Sessions are created against the
//! global [`Codebook`], are not internally synchronized and are owned by a
//! single importer. All methods take the container bytes again; a session
//! keeps decoded global state between calls, never a pointer to the data.

use thiserror::Error;

use super::codebook::Codebook;
use crate::formats::target::TargetFormat;

/// Container-wide metadata read once at open time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileSummary {
    pub image_count: u32,
    /// Mip level count of each image, indexed by image
    pub level_counts: Vec<u32>,
    /// Whether images were stored with a bottom-left origin
    pub y_flipped: bool,
}

/// Per-image metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub level_count: u32,
    /// Original width of the base level
    pub width: u32,
    /// Original height of the base level
    pub height: u32,
}

/// Per-level geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelDesc {
    /// Original width in pixels
    pub width: u32,
    /// Original height in pixels
    pub height: u32,
    /// Number of 4x4 blocks covering the level
    pub total_blocks: u32,
}

/// Optional engine decode behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeFlags {
    /// Slower, higher quality ETC1S to BC7/ASTC transcoding
    pub high_quality: bool,
    /// Never emit BC1 blocks using the three-color punch-through mode
    pub bc1_forbid_three_color_blocks: bool,
    /// Transcode alpha slices into opaque-only targets instead of color
    pub alpha_to_opaque: bool,
}

impl DecodeFlags {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::default()
    }
}

/// A request to transcode one level into a caller-sized buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeRequest {
    pub image: u32,
    pub level: u32,
    pub format: TargetFormat,
    /// Row pitch in pixels for uncompressed output, `None` lets the engine
    /// derive it from the level width
    pub row_stride: Option<u32>,
    /// Row count for uncompressed output, `None` for compressed output
    pub output_rows: Option<u32>,
    /// Output size in blocks (compressed) or pixels (uncompressed)
    pub unit_count: u32,
    pub decode_flags: DecodeFlags,
}

/// Engine-side transcode failure
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("target format {0} not supported by the engine")]
    FormatNotSupported(TargetFormat),

    #[error("image {image} level {level} not found")]
    LevelNotFound { image: u32, level: u32 },

    #[error("output size mismatch: expected {expected} bytes, engine produced {actual}")]
    OutputSizeMismatch { expected: usize, actual: usize },

    #[error("{0}")]
    Failed(String),
}

/// One transcoding engine session
pub trait Transcoder: Sized {
    /// Create a session bound to the global tables
    fn new(codebook: &'static Codebook) -> Self;

    /// Cheap structural check of the container header
    fn validate_header(&self, data: &[u8]) -> bool;

    /// Read image and level counts, `None` if the container is malformed
    fn file_summary(&self, data: &[u8]) -> Option<FileSummary>;

    /// Decode the container's global codebooks into the session
    fn start_transcoding(&mut self, data: &[u8]) -> bool;

    /// Release whatever `start_transcoding` decoded
    fn stop_transcoding(&mut self);

    fn image_info(&self, data: &[u8], image: u32) -> Option<ImageInfo>;

    fn level_desc(&self, data: &[u8], image: u32, level: u32) -> Option<LevelDesc>;

    /// Transcode into `output`, which is exactly
    /// `unit_count * format.bytes_per_block_or_pixel()` bytes long
    fn transcode_level(
        &self,
        data: &[u8],
        request: &TranscodeRequest,
        output: &mut [u8],
    ) -> Result<(), EngineError>;
}
