//! Basis Universal container header
//!
//! Only the header is read here. Slice descriptors, codebooks and payloads
//! are left to the transcoding engine.

mod header;

pub use header::BasisFileHeader;

/// `sB`, read as a little-endian u16
pub const BASIS_SIGNATURE: u16 = 0x4273;

/// Size of the packed header in bytes
pub const BASIS_HEADER_SIZE: usize = 77;

/// Header flag bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderFlags(pub u16);

impl HeaderFlags {
    pub const ETC1S: u16 = 1;
    pub const Y_FLIPPED: u16 = 2;
    pub const HAS_ALPHA_SLICES: u16 = 4;
    pub const USES_GLOBAL_CODEBOOK: u16 = 8;
    pub const SRGB: u16 = 16;

    #[must_use]
    pub fn etc1s(self) -> bool {
        self.0 & Self::ETC1S != 0
    }

    /// Whether the encoder flipped the images vertically (Y-up origin)
    #[must_use]
    pub fn y_flipped(self) -> bool {
        self.0 & Self::Y_FLIPPED != 0
    }

    #[must_use]
    pub fn has_alpha_slices(self) -> bool {
        self.0 & Self::HAS_ALPHA_SLICES != 0
    }

    #[must_use]
    pub fn uses_global_codebook(self) -> bool {
        self.0 & Self::USES_GLOBAL_CODEBOOK != 0
    }

    /// Whether color data is sRGB-encoded
    #[must_use]
    pub fn srgb(self) -> bool {
        self.0 & Self::SRGB != 0
    }
}

/// Kind of texture stored in the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureType {
    #[default]
    Texture2D,
    Array2D,
    CubemapArray,
    VideoFrames,
    Volume,
    Unknown(u8),
}

impl TextureType {
    #[must_use]
    pub fn from_raw(value: u8) -> Self {
        match value {
            0 => Self::Texture2D,
            1 => Self::Array2D,
            2 => Self::CubemapArray,
            3 => Self::VideoFrames,
            4 => Self::Volume,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub fn to_raw(self) -> u8 {
        match self {
            Self::Texture2D => 0,
            Self::Array2D => 1,
            Self::CubemapArray => 2,
            Self::VideoFrames => 3,
            Self::Volume => 4,
            Self::Unknown(other) => other,
        }
    }

    /// Human-readable name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Texture2D => "2D",
            Self::Array2D => "2D array",
            Self::CubemapArray => "cubemap array",
            Self::VideoFrames => "video frames",
            Self::Volume => "volume",
            Self::Unknown(_) => "unknown",
        }
    }
}
