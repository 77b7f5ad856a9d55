//! Basis Universal transcoding
//!
//! [`codebook::initialize`] must run once before any [`BasisImporter`] is
//! built. The engine behind an importer is chosen by its [`Transcoder`] type
//! parameter; with the `basisu` feature, [`DefaultBasisImporter`] uses the
//! Basis Universal engine.

pub mod codebook;
pub mod engine;
mod importer;
mod transcode;

#[cfg(feature = "basisu")]
mod basisu;

pub use codebook::Codebook;
pub use engine::{
    DecodeFlags, EngineError, FileSummary, ImageInfo, LevelDesc, TranscodeRequest, Transcoder,
};
pub use importer::{ALIAS_PREFIX, ALIASES, BasisImporter};
pub use transcode::OutputGeometry;

#[cfg(feature = "basisu")]
pub use basisu::BasisuTranscoder;

/// Basis importer over the Basis Universal engine
#[cfg(feature = "basisu")]
pub type DefaultBasisImporter = BasisImporter<BasisuTranscoder>;
