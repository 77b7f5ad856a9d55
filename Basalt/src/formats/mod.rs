//! Texture format descriptions
//!
//! - [`target`]: transcoding targets and the format table
//! - [`pixel`]: pixel format tags carried by imported images
//! - [`basis`]: the raw Basis Universal container header

pub mod basis;
pub mod pixel;
pub mod target;

pub use basis::{BasisFileHeader, HeaderFlags, TextureType};
pub use pixel::{CompressedPixelFormat, ImageFormat, PixelFormat};
pub use target::{TargetFormat, expected_names, format_to_name, name_to_format, resolve_pixel_format};
