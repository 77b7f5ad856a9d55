//! Error types for `Basalt`

use std::path::PathBuf;

use thiserror::Error;

use crate::basis::EngineError;
use crate::formats::pixel::{ImageFormat, PixelFormat};

/// The error type for `Basalt` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file could not be read.
    #[error("cannot read {path}: {source}")]
    FileRead {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    // ==================== Container Errors ====================
    /// The input buffer handed to an importer was empty.
    #[error("the file is empty")]
    EmptyFile,

    /// The container header failed validation.
    #[error("invalid header")]
    InvalidHeader,

    /// The header was valid but the container metadata could not be read
    /// or transcoding could not be started.
    #[error("bad basis file")]
    BadBasisFile,

    /// An operation that needs an opened container was called while closed.
    #[error("no file opened")]
    NotOpened,

    // ==================== Target Format Errors ====================
    /// The configured transcoding target does not name a known format.
    #[error("image {image}: invalid transcoding target format {name}, expected to be one of {expected}")]
    InvalidTargetFormat {
        /// The image the transcode was requested for.
        image: u32,
        /// The configured (unresolvable) name.
        name: String,
        /// Comma-separated list of accepted names.
        expected: String,
    },

    // ==================== Transcoding Errors ====================
    /// The transcoding engine failed to produce a level.
    #[error("transcoding image {image} level {level} failed")]
    TranscodeFailed {
        /// Image index.
        image: u32,
        /// Mip level.
        level: u32,
        /// What the engine reported.
        #[source]
        source: EngineError,
    },

    // ==================== Image Codec Errors ====================
    /// Error from the `image` crate codecs.
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// The pixel format cannot be written by the chosen converter.
    #[error("unsupported pixel format {0:?}")]
    UnsupportedPixelFormat(PixelFormat),

    /// A compressed image was handed to a converter that only takes pixels.
    #[error("compressed format {0:?} cannot be converted, decompress it first")]
    CompressedInput(ImageFormat),

    /// The pixel buffer does not match the declared size and format.
    #[error("image data too small: expected {expected} bytes, got {actual}")]
    ImageDataTooSmall {
        /// Required byte count.
        expected: usize,
        /// Byte count actually present.
        actual: usize,
    },

    // ==================== Export Errors ====================
    /// The image format has no DDS or preview counterpart.
    #[error("cannot export {0:?}")]
    UnsupportedExportFormat(ImageFormat),

    /// DDS container creation or serialization failed.
    #[error("DDS error: {0}")]
    DdsError(String),

    // ==================== Configuration Errors ====================
    /// Importer configuration could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Importer configuration could not be serialized.
    #[error("configuration write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

/// A specialized Result type for `Basalt` operations.
pub type Result<T> = std::result::Result<T, Error>;
