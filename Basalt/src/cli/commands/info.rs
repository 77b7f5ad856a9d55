//! CLI command for inspecting .basis files

use std::path::Path;

use crate::basis::{DefaultBasisImporter, codebook};
use crate::importer::Importer;

pub fn execute(source: &Path) -> anyhow::Result<()> {
    let mut importer = DefaultBasisImporter::new(codebook::initialize());
    importer.open_file(source)?;

    let header = importer
        .header()
        .ok_or_else(|| anyhow::anyhow!("No header after opening {}", source.display()))?;

    println!("Basis Information: {}", source.display());
    println!();
    println!("Version: {:#x}", header.version);
    println!("Codec: {}", if header.is_uastc() { "UASTC 4x4" } else { "ETC1S" });
    println!("Texture type: {}", header.tex_type.as_str());
    println!("Color space: {}", if header.flags.srgb() { "sRGB" } else { "linear" });
    println!("Y-flipped: {}", header.flags.y_flipped());
    println!("Alpha slices: {}", header.flags.has_alpha_slices());
    println!("Slices: {}", header.total_slices);
    if header.us_per_frame != 0 {
        println!("Frame time: {} us", header.us_per_frame);
    }
    println!("Images: {}", importer.image2d_count());

    for image in 0..importer.image2d_count() {
        let levels = importer.image2d_level_count(image);
        println!();
        println!("Image {image} ({levels} levels)");
        for level in 0..levels {
            if let Some(desc) = importer.level_desc(image, level) {
                println!(
                    "  Level {level}: {}x{} ({} blocks)",
                    desc.width, desc.height, desc.total_blocks
                );
            }
        }
    }

    Ok(())
}
