//! Advisories: conditions worth telling the caller about that never abort
//! the operation that noticed them.
//!
//! Every advisory goes out as a `tracing` warning under the
//! `basalt::advisory` target, so applications can route or silence them
//! independently of errors.

use std::fmt;

/// Log target used for all advisories
pub const ADVISORY_TARGET: &str = "basalt::advisory";

/// A non-fatal condition
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// No transcoding target configured, falling back to RGBA8
    NoTargetFormat,
    /// The container was not encoded Y-flipped, rows come out top to bottom
    NotYFlipped,
    /// A 1D array image is written as a plain 2D image
    ArrayFlattened {
        /// Output format name, e.g. `PNG`
        format: &'static str,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTargetFormat => f.write_str(
                "no format to transcode to was specified, falling back to uncompressed RGBA8. \
                 To get rid of this warning either construct the importer via one of its \
                 BasisImporterEtc1RGB, ... aliases, or explicitly set the format option in \
                 the importer configuration",
            ),
            Self::NotYFlipped => f.write_str(
                "the image was not encoded Y-flipped, imported data will have wrong orientation",
            ),
            Self::ArrayFlattened { format } => write!(
                f,
                "1D array images are unrepresentable in {format}, saving as a regular 2D image"
            ),
        }
    }
}

impl Advisory {
    /// Report through the advisory channel
    pub fn emit(&self, context: &str) {
        tracing::warn!(target: ADVISORY_TARGET, "{context}: {self}");
    }
}
