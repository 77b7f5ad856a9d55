//! CLI command converting WebP to PNG

use std::path::Path;

use crate::importer::Importer;
use crate::png::{ImageConverter, PngImageConverter};
use crate::webp::WebpImporter;

pub fn execute(source: &Path, destination: &Path, quiet: bool) -> anyhow::Result<()> {
    let mut importer = WebpImporter::new();
    importer.open_file(source)?;
    let image = importer.image2d(0, 0)?;

    PngImageConverter::new()
        .quiet(quiet)
        .convert_to_file(&image.as_view(), destination)?;

    if !quiet {
        println!(
            "Converted {} -> {} ({}x{})",
            source.display(),
            destination.display(),
            image.width(),
            image.height()
        );
    }
    Ok(())
}
