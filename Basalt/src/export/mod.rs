//! Writing transcoded levels to disk
//!
//! - [`dds`]: block-compressed and RGBA8 levels as single-mip DDS files
//! - [`preview`]: BC levels decoded to RGBA8 for PNG export

pub mod dds;
pub mod preview;

pub use dds::{image_to_dds_bytes, write_dds};
pub use preview::decompress_to_rgba;
