//! Image import abstraction
//!
//! An [`Importer`] opens one file's worth of data, reports how many 2D images
//! and mip levels it holds, and produces [`ImageData2D`] on request. Both the
//! Basis Universal importer and the WebP importer implement it.

mod config;
mod data;
mod image;

pub use config::{FORMAT_OPTION, ImporterConfig};
pub use data::{ContainerBytes, InputData};
pub use self::image::{ImageData2D, ImageFlags, ImageView2D};

use std::path::Path;

use crate::error::{Error, Result};

/// Capabilities an importer advertises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImporterFeature {
    /// Can open data from memory
    OpenData,
}

/// Common interface of all importers
pub trait Importer {
    /// Features supported by this importer
    fn features(&self) -> &'static [ImporterFeature];

    /// Whether a file is currently opened
    fn is_opened(&self) -> bool;

    /// Close the opened file, if any. Calling this on a closed importer does
    /// nothing.
    fn close(&mut self);

    /// Open raw data
    ///
    /// Any previously opened file is closed first, also when opening fails.
    /// On failure the importer stays closed.
    fn open_data(&mut self, data: InputData<'_>) -> Result<()>;

    /// Read a file and open it, handing the read buffer over to the importer
    fn open_file(&mut self, path: &Path) -> Result<()> {
        let data = std::fs::read(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Opening {} ({} bytes)", path.display(), data.len());
        self.open_data(InputData::Owned(data))
    }

    /// Number of 2D images, zero when closed
    fn image2d_count(&self) -> u32;

    /// Number of mip levels of image `id`
    ///
    /// # Panics
    /// Panics if no file is opened or `id` is out of range.
    fn image2d_level_count(&self, id: u32) -> u32;

    /// Import one level of one image
    ///
    /// # Panics
    /// Panics if `id` or `level` is out of range for the opened file.
    fn image2d(&mut self, id: u32, level: u32) -> Result<ImageData2D>;
}
