//! # Basalt
//!
//! A pure-Rust importer for Basis Universal supercompressed textures.
//!
//! ## Overview
//!
//! - **Basis importer** - open `.basis` containers and transcode any image
//!   level to a GPU block format (BC, ETC, EAC, PVRTC, ASTC) or RGBA8
//! - **Target format table** - names, pixel formats and output sizes of every
//!   transcoding target
//! - **WebP importer** and **PNG converter** - companion image I/O
//! - **Export** - DDS files and RGBA8 previews of transcoded levels
//!
//! ## Quick Start
//!
//! ```no_run
//! use basalt::prelude::*;
//!
//! let codebook = basalt::basis::codebook::initialize();
//! let mut importer = DefaultBasisImporter::new(codebook);
//! importer.set_target_format(TargetFormat::Bc7RGBA);
//! importer.open_file(std::path::Path::new("texture.basis"))?;
//!
//! for level in 0..importer.image2d_level_count(0) {
//!     let image = importer.image2d(0, level)?;
//!     println!("{}x{} {:?}", image.width(), image.height(), image.format());
//! }
//! # Ok::<(), basalt::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `basisu` - the Basis Universal transcoding engine (default)
//! - `cli` - the `basalt` command-line binary (default)

pub mod advisory;
pub mod basis;
pub mod error;
pub mod export;
pub mod formats;
pub mod importer;
pub mod png;
pub mod webp;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::advisory::Advisory;
    pub use crate::basis::{ALIASES, BasisImporter, Codebook, DecodeFlags, LevelDesc, Transcoder};
    #[cfg(feature = "basisu")]
    pub use crate::basis::{BasisuTranscoder, DefaultBasisImporter};
    pub use crate::error::{Error, Result};
    pub use crate::formats::pixel::{CompressedPixelFormat, ImageFormat, PixelFormat};
    pub use crate::formats::target::TargetFormat;
    pub use crate::importer::{
        ImageData2D, ImageView2D, Importer, ImporterConfig, InputData,
    };
    pub use crate::png::{ImageConverter, PngImageConverter};
    pub use crate::webp::WebpImporter;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
