//! CLI command for transcoding .basis files

use std::path::{Path, PathBuf};

use crate::basis::{DecodeFlags, DefaultBasisImporter, codebook};
use crate::export::{decompress_to_rgba, write_dds};
use crate::importer::{FORMAT_OPTION, ImageData2D, Importer, ImporterConfig};
use crate::png::{ImageConverter, PngImageConverter};

pub struct TranscodeArgs<'a> {
    pub source: &'a Path,
    pub destination: &'a Path,
    pub format: Option<&'a str>,
    pub config: Option<&'a Path>,
    pub image: u32,
    pub level: Option<u32>,
    pub all_levels: bool,
    pub high_quality: bool,
}

/// `out.dds` -> `out_L2.dds`
fn level_path(destination: &Path, level: u32) -> PathBuf {
    let stem = destination
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}_L{level}");
    if let Some(ext) = destination.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    destination.with_file_name(name)
}

fn write_level(image: &ImageData2D, path: &Path) -> anyhow::Result<()> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| anyhow::anyhow!("Cannot detect output format from destination file extension"))?;

    match extension.as_str() {
        "dds" => write_dds(image, path)?,
        "png" => {
            let preview = decompress_to_rgba(image)?;
            PngImageConverter::new().convert_to_file(&preview.as_view(), path)?;
        }
        other => anyhow::bail!("Unsupported output format: {other} (expected dds or png)"),
    }
    Ok(())
}

pub fn execute(args: &TranscodeArgs<'_>) -> anyhow::Result<()> {
    let mut config = match args.config {
        Some(path) => ImporterConfig::load(path)?,
        None => ImporterConfig::new(),
    };
    if let Some(format) = args.format {
        config.set_value(FORMAT_OPTION, format);
    }

    let mut importer = DefaultBasisImporter::with_config(codebook::initialize(), config);
    importer.set_decode_flags(DecodeFlags {
        high_quality: args.high_quality,
        ..DecodeFlags::default()
    });
    importer.open_file(args.source)?;

    if args.image >= importer.image2d_count() {
        anyhow::bail!(
            "Image {} out of range, {} has {} images",
            args.image,
            args.source.display(),
            importer.image2d_count()
        );
    }
    let level_count = importer.image2d_level_count(args.image);

    let levels: Vec<u32> = if args.all_levels {
        (0..level_count).collect()
    } else {
        let level = args.level.unwrap_or(0);
        if level >= level_count {
            anyhow::bail!("Level {level} out of range, image {} has {level_count} levels", args.image);
        }
        vec![level]
    };

    for level in levels {
        let image = importer.image2d(args.image, level)?;
        let path = if args.all_levels {
            level_path(args.destination, level)
        } else {
            args.destination.to_path_buf()
        };
        write_level(&image, &path)?;
        println!(
            "Image {} level {}: {}x{} {:?} -> {}",
            args.image,
            level,
            image.width(),
            image.height(),
            image.format(),
            path.display()
        );
    }

    Ok(())
}
