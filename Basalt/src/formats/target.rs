//! Transcoding target formats
//!
//! [`TargetFormat`] is the caller-facing choice of output encoding. The
//! [`FORMAT_TABLE`] maps each target to its configuration name, the pixel
//! format pair it resolves to (sRGB / linear) and the size of one output
//! unit. Configuration parsing, error messages and the transcode pipeline all
//! read this one table.

use std::fmt;
use std::str::FromStr;

use super::pixel::{CompressedPixelFormat, ImageFormat, PixelFormat};

/// Output encoding requested from the transcoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    /// ETC1 RGB, imported as ETC2 RGB8
    Etc1RGB,
    /// ETC2 RGBA8 with EAC alpha
    Etc2RGBA,
    /// BC1 RGB (DXT1)
    Bc1RGB,
    /// BC3 RGBA (DXT5)
    Bc3RGBA,
    /// BC4 single channel
    Bc4R,
    /// BC5 two channels
    Bc5RG,
    /// BC7 without alpha, imported as BC7 RGBA
    Bc7RGB,
    /// BC7 RGBA
    Bc7RGBA,
    /// PVRTC1 RGB, 4 bits per pixel
    PvrtcRGB4bpp,
    /// PVRTC1 RGBA, 4 bits per pixel
    PvrtcRGBA4bpp,
    /// ASTC 4x4 RGBA
    Astc4x4RGBA,
    /// Uncompressed 32-bit RGBA
    RGBA8,
    /// EAC R11
    EacR,
    /// EAC RG11
    EacRG,
}

/// What a target format resolves to, before the color space is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Per-pixel output with sRGB and linear variants
    Uncompressed { srgb: PixelFormat, linear: PixelFormat },
    /// Per-block output with sRGB and linear variants (equal when the
    /// format has no sRGB encoding)
    Compressed {
        srgb: CompressedPixelFormat,
        linear: CompressedPixelFormat,
    },
}

/// One row of the format table.
#[derive(Debug, Clone, Copy)]
pub struct FormatEntry {
    pub format: TargetFormat,
    pub name: &'static str,
    pub resolution: Resolution,
    /// Bytes per output block (compressed) or pixel (uncompressed)
    pub bytes_per_unit: u32,
}

const fn compressed(
    format: TargetFormat,
    name: &'static str,
    srgb: CompressedPixelFormat,
    linear: CompressedPixelFormat,
) -> FormatEntry {
    FormatEntry {
        format,
        name,
        resolution: Resolution::Compressed { srgb, linear },
        bytes_per_unit: srgb.block_data_size() as u32,
    }
}

/// The format table, indexed by `TargetFormat as usize`.
pub const FORMAT_TABLE: [FormatEntry; TargetFormat::COUNT] = {
    use CompressedPixelFormat as C;
    use TargetFormat as T;
    [
        compressed(T::Etc1RGB, "Etc1RGB", C::Etc2RGB8Srgb, C::Etc2RGB8Unorm),
        compressed(T::Etc2RGBA, "Etc2RGBA", C::Etc2RGBA8Srgb, C::Etc2RGBA8Unorm),
        compressed(T::Bc1RGB, "Bc1RGB", C::Bc1RGBSrgb, C::Bc1RGBUnorm),
        compressed(T::Bc3RGBA, "Bc3RGBA", C::Bc3RGBASrgb, C::Bc3RGBAUnorm),
        compressed(T::Bc4R, "Bc4R", C::Bc4RUnorm, C::Bc4RUnorm),
        compressed(T::Bc5RG, "Bc5RG", C::Bc5RGUnorm, C::Bc5RGUnorm),
        compressed(T::Bc7RGB, "Bc7RGB", C::Bc7RGBASrgb, C::Bc7RGBAUnorm),
        compressed(T::Bc7RGBA, "Bc7RGBA", C::Bc7RGBASrgb, C::Bc7RGBAUnorm),
        compressed(T::PvrtcRGB4bpp, "PvrtcRGB4bpp", C::PvrtcRGB4bppSrgb, C::PvrtcRGB4bppUnorm),
        compressed(T::PvrtcRGBA4bpp, "PvrtcRGBA4bpp", C::PvrtcRGBA4bppSrgb, C::PvrtcRGBA4bppUnorm),
        compressed(T::Astc4x4RGBA, "Astc4x4RGBA", C::Astc4x4RGBASrgb, C::Astc4x4RGBAUnorm),
        FormatEntry {
            format: T::RGBA8,
            name: "RGBA8",
            resolution: Resolution::Uncompressed {
                srgb: PixelFormat::RGBA8Srgb,
                linear: PixelFormat::RGBA8Unorm,
            },
            bytes_per_unit: PixelFormat::RGBA8Unorm.pixel_size() as u32,
        },
        compressed(T::EacR, "EacR", C::EacR11Unorm, C::EacR11Unorm),
        compressed(T::EacRG, "EacRG", C::EacRG11Unorm, C::EacRG11Unorm),
    ]
};

// Every row must sit at the index of the enumerator it describes.
const _: () = {
    let mut i = 0;
    while i < FORMAT_TABLE.len() {
        assert!(FORMAT_TABLE[i].format as usize == i, "format table out of order");
        i += 1;
    }
};

impl TargetFormat {
    /// Number of target formats
    pub const COUNT: usize = 14;

    /// All target formats in table order
    pub const ALL: [TargetFormat; Self::COUNT] = [
        Self::Etc1RGB,
        Self::Etc2RGBA,
        Self::Bc1RGB,
        Self::Bc3RGBA,
        Self::Bc4R,
        Self::Bc5RG,
        Self::Bc7RGB,
        Self::Bc7RGBA,
        Self::PvrtcRGB4bpp,
        Self::PvrtcRGBA4bpp,
        Self::Astc4x4RGBA,
        Self::RGBA8,
        Self::EacR,
        Self::EacRG,
    ];

    /// Table row for this format
    #[must_use]
    pub fn entry(self) -> &'static FormatEntry {
        let table: &'static [FormatEntry; Self::COUNT] = &FORMAT_TABLE;
        &table[self as usize]
    }

    /// Configuration name of this format
    #[must_use]
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Look a format up by its configuration name
    ///
    /// Returns `None` for any name outside the table, including the empty
    /// string.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        FORMAT_TABLE.iter().find(|entry| entry.name == name).map(|entry| entry.format)
    }

    /// Name for an optional format, `<invalid>` when there is none
    #[must_use]
    pub fn name_or_invalid(format: Option<Self>) -> &'static str {
        format.map_or("<invalid>", Self::name)
    }

    /// Whether the output is organized in blocks rather than pixels
    #[must_use]
    pub fn is_compressed(self) -> bool {
        matches!(self.entry().resolution, Resolution::Compressed { .. })
    }

    /// Bytes per output block (compressed) or pixel (uncompressed)
    #[must_use]
    pub fn bytes_per_block_or_pixel(self) -> u32 {
        self.entry().bytes_per_unit
    }

    /// Concrete pixel format produced for a source in the given color space
    ///
    /// `is_srgb` is ignored for formats without an sRGB variant.
    #[must_use]
    pub fn resolve(self, is_srgb: bool) -> ImageFormat {
        match self.entry().resolution {
            Resolution::Uncompressed { srgb, linear } => {
                ImageFormat::Uncompressed(if is_srgb { srgb } else { linear })
            }
            Resolution::Compressed { srgb, linear } => {
                ImageFormat::Compressed(if is_srgb { srgb } else { linear })
            }
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown target format name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTargetFormat(pub String);

impl fmt::Display for UnknownTargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown target format '{}', expected one of {}",
            self.0,
            expected_names()
        )
    }
}

impl std::error::Error for UnknownTargetFormat {}

impl FromStr for TargetFormat {
    type Err = UnknownTargetFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownTargetFormat(s.to_string()))
    }
}

/// Look a format up by name, `None` if the name is not in the table
#[must_use]
pub fn name_to_format(name: &str) -> Option<TargetFormat> {
    TargetFormat::from_name(name)
}

/// Configuration name of a format
#[must_use]
pub fn format_to_name(format: TargetFormat) -> &'static str {
    format.name()
}

/// Concrete pixel format for a target, given the source color space
#[must_use]
pub fn resolve_pixel_format(format: TargetFormat, is_srgb: bool) -> ImageFormat {
    format.resolve(is_srgb)
}

/// Every accepted name, comma separated, in table order
#[must_use]
pub fn expected_names() -> String {
    FORMAT_TABLE
        .iter()
        .map(|entry| entry.name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_round_trip() {
        for format in TargetFormat::ALL {
            let name = format_to_name(format);
            assert_eq!(name_to_format(name), Some(format));
            assert_eq!(format_to_name(name_to_format(name).unwrap()), name);
        }
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(name_to_format(""), None);
        assert_eq!(name_to_format("bc3rgba"), None);
        assert_eq!(name_to_format("Pvrtc1RGB4bpp"), None);
        assert_eq!(name_to_format("RGB565"), None);
        assert_eq!(TargetFormat::name_or_invalid(None), "<invalid>");
        assert!("Bc9".parse::<TargetFormat>().is_err());
    }

    #[test]
    fn test_resolution_color_space() {
        assert_eq!(
            resolve_pixel_format(TargetFormat::RGBA8, true),
            ImageFormat::Uncompressed(PixelFormat::RGBA8Srgb)
        );
        assert_eq!(
            resolve_pixel_format(TargetFormat::RGBA8, false),
            ImageFormat::Uncompressed(PixelFormat::RGBA8Unorm)
        );
        assert_eq!(
            resolve_pixel_format(TargetFormat::Bc1RGB, true),
            ImageFormat::Compressed(CompressedPixelFormat::Bc1RGBSrgb)
        );
        assert_eq!(
            resolve_pixel_format(TargetFormat::Bc7RGB, false),
            ImageFormat::Compressed(CompressedPixelFormat::Bc7RGBAUnorm)
        );
    }

    #[test]
    fn test_linear_only_formats_ignore_srgb() {
        for format in [TargetFormat::Bc4R, TargetFormat::Bc5RG, TargetFormat::EacR, TargetFormat::EacRG] {
            assert_eq!(format.resolve(true), format.resolve(false));
        }
    }

    #[test]
    fn test_resolution_total_and_deterministic() {
        for format in TargetFormat::ALL {
            for is_srgb in [false, true] {
                let first = format.resolve(is_srgb);
                assert_eq!(first, format.resolve(is_srgb));
                assert_eq!(first.is_compressed(), format.is_compressed());
            }
        }
    }

    #[test]
    fn test_bytes_per_unit() {
        assert_eq!(TargetFormat::RGBA8.bytes_per_block_or_pixel(), 4);
        assert_eq!(TargetFormat::Bc1RGB.bytes_per_block_or_pixel(), 8);
        assert_eq!(TargetFormat::Bc4R.bytes_per_block_or_pixel(), 8);
        assert_eq!(TargetFormat::Etc1RGB.bytes_per_block_or_pixel(), 8);
        assert_eq!(TargetFormat::PvrtcRGBA4bpp.bytes_per_block_or_pixel(), 8);
        assert_eq!(TargetFormat::EacR.bytes_per_block_or_pixel(), 8);
        assert_eq!(TargetFormat::Bc7RGBA.bytes_per_block_or_pixel(), 16);
        assert_eq!(TargetFormat::Astc4x4RGBA.bytes_per_block_or_pixel(), 16);
        assert_eq!(TargetFormat::EacRG.bytes_per_block_or_pixel(), 16);
    }

    #[test]
    fn test_expected_names_lists_table() {
        let names = expected_names();
        assert!(names.starts_with("Etc1RGB, Etc2RGBA"));
        assert!(names.ends_with("EacR, EacRG"));
        assert_eq!(names.split(", ").count(), TargetFormat::COUNT);
    }
}
