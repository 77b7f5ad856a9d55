//! `.basis` file header reading
//!
//! The header is a packed, little-endian structure of 77 bytes at the start
//! of every container. Several fields use 24-bit integers.

use super::{BASIS_HEADER_SIZE, BASIS_SIGNATURE, HeaderFlags, TextureType};
use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

/// Parsed `.basis` container header
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasisFileHeader {
    pub version: u16,
    pub header_size: u16,
    pub header_crc16: u16,
    pub data_size: u32,
    pub data_crc16: u16,
    /// Total slices, alpha slices included
    pub total_slices: u32,
    pub total_images: u32,
    /// Supercompression codec: 0 = ETC1S, 1 = UASTC 4x4
    pub tex_format: u8,
    pub flags: HeaderFlags,
    pub tex_type: TextureType,
    pub us_per_frame: u32,
    pub userdata0: u32,
    pub userdata1: u32,
    pub total_endpoints: u16,
    pub endpoint_cb_file_ofs: u32,
    pub endpoint_cb_file_size: u32,
    pub total_selectors: u16,
    pub selector_cb_file_ofs: u32,
    pub selector_cb_file_size: u32,
    pub tables_file_ofs: u32,
    pub tables_file_size: u32,
    pub slice_desc_file_ofs: u32,
    pub extended_file_ofs: u32,
    pub extended_file_size: u32,
}

impl BasisFileHeader {
    /// Parse the header at the start of `data`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`] if `data` is shorter than the header
    /// or does not start with the `sB` signature.
    ///
    /// [`Error::InvalidHeader`]: crate::Error::InvalidHeader
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < BASIS_HEADER_SIZE {
            return Err(Error::InvalidHeader);
        }

        let mut cursor = Cursor::new(data);
        let signature = cursor.read_u16::<LittleEndian>()?;
        if signature != BASIS_SIGNATURE {
            return Err(Error::InvalidHeader);
        }

        let version = cursor.read_u16::<LittleEndian>()?;
        let header_size = cursor.read_u16::<LittleEndian>()?;
        let header_crc16 = cursor.read_u16::<LittleEndian>()?;
        let data_size = cursor.read_u32::<LittleEndian>()?;
        let data_crc16 = cursor.read_u16::<LittleEndian>()?;
        let total_slices = cursor.read_u24::<LittleEndian>()?;
        let total_images = cursor.read_u24::<LittleEndian>()?;
        let tex_format = cursor.read_u8()?;
        let flags = HeaderFlags(cursor.read_u16::<LittleEndian>()?);
        let tex_type = TextureType::from_raw(cursor.read_u8()?);
        let us_per_frame = cursor.read_u24::<LittleEndian>()?;
        // m_reserved
        cursor.read_u32::<LittleEndian>()?;
        let userdata0 = cursor.read_u32::<LittleEndian>()?;
        let userdata1 = cursor.read_u32::<LittleEndian>()?;
        let total_endpoints = cursor.read_u16::<LittleEndian>()?;
        let endpoint_cb_file_ofs = cursor.read_u32::<LittleEndian>()?;
        let endpoint_cb_file_size = cursor.read_u24::<LittleEndian>()?;
        let total_selectors = cursor.read_u16::<LittleEndian>()?;
        let selector_cb_file_ofs = cursor.read_u32::<LittleEndian>()?;
        let selector_cb_file_size = cursor.read_u24::<LittleEndian>()?;
        let tables_file_ofs = cursor.read_u32::<LittleEndian>()?;
        let tables_file_size = cursor.read_u32::<LittleEndian>()?;
        let slice_desc_file_ofs = cursor.read_u32::<LittleEndian>()?;
        let extended_file_ofs = cursor.read_u32::<LittleEndian>()?;
        let extended_file_size = cursor.read_u32::<LittleEndian>()?;

        Ok(Self {
            version,
            header_size,
            header_crc16,
            data_size,
            data_crc16,
            total_slices,
            total_images,
            tex_format,
            flags,
            tex_type,
            us_per_frame,
            userdata0,
            userdata1,
            total_endpoints,
            endpoint_cb_file_ofs,
            endpoint_cb_file_size,
            total_selectors,
            selector_cb_file_ofs,
            selector_cb_file_size,
            tables_file_ofs,
            tables_file_size,
            slice_desc_file_ofs,
            extended_file_ofs,
            extended_file_size,
        })
    }

    /// Serialize the header back into its packed 77-byte form
    ///
    /// CRC fields are written as stored, not recomputed.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(BASIS_HEADER_SIZE);
        out.write_u16::<LittleEndian>(BASIS_SIGNATURE)?;
        out.write_u16::<LittleEndian>(self.version)?;
        out.write_u16::<LittleEndian>(self.header_size)?;
        out.write_u16::<LittleEndian>(self.header_crc16)?;
        out.write_u32::<LittleEndian>(self.data_size)?;
        out.write_u16::<LittleEndian>(self.data_crc16)?;
        out.write_u24::<LittleEndian>(self.total_slices)?;
        out.write_u24::<LittleEndian>(self.total_images)?;
        out.write_u8(self.tex_format)?;
        out.write_u16::<LittleEndian>(self.flags.0)?;
        out.write_u8(self.tex_type.to_raw())?;
        out.write_u24::<LittleEndian>(self.us_per_frame)?;
        out.write_u32::<LittleEndian>(0)?;
        out.write_u32::<LittleEndian>(self.userdata0)?;
        out.write_u32::<LittleEndian>(self.userdata1)?;
        out.write_u16::<LittleEndian>(self.total_endpoints)?;
        out.write_u32::<LittleEndian>(self.endpoint_cb_file_ofs)?;
        out.write_u24::<LittleEndian>(self.endpoint_cb_file_size)?;
        out.write_u16::<LittleEndian>(self.total_selectors)?;
        out.write_u32::<LittleEndian>(self.selector_cb_file_ofs)?;
        out.write_u24::<LittleEndian>(self.selector_cb_file_size)?;
        out.write_u32::<LittleEndian>(self.tables_file_ofs)?;
        out.write_u32::<LittleEndian>(self.tables_file_size)?;
        out.write_u32::<LittleEndian>(self.slice_desc_file_ofs)?;
        out.write_u32::<LittleEndian>(self.extended_file_ofs)?;
        out.write_u32::<LittleEndian>(self.extended_file_size)?;
        Ok(out)
    }

    /// Whether the payload is UASTC rather than ETC1S
    #[must_use]
    pub fn is_uastc(&self) -> bool {
        self.tex_format == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> BasisFileHeader {
        BasisFileHeader {
            version: 0x13,
            header_size: BASIS_HEADER_SIZE as u16,
            data_size: 1234,
            total_slices: 6,
            total_images: 2,
            flags: HeaderFlags(HeaderFlags::ETC1S | HeaderFlags::Y_FLIPPED | HeaderFlags::SRGB),
            tex_type: TextureType::Array2D,
            userdata1: 0xDEAD_BEEF,
            slice_desc_file_ofs: 77,
            ..Default::default()
        }
    }

    #[test]
    fn test_header_layout() {
        let bytes = sample().to_bytes().unwrap();
        assert_eq!(bytes.len(), BASIS_HEADER_SIZE);
        assert_eq!(&bytes[0..2], b"sB");
        // Flags live right after the 24-bit image count and the format byte
        assert_eq!(u16::from_le_bytes([bytes[21], bytes[22]]), 0x13);
    }

    #[test]
    fn test_parse_round_trip() {
        let header = sample();
        let parsed = BasisFileHeader::parse(&header.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, header);
        assert!(parsed.flags.srgb());
        assert!(parsed.flags.y_flipped());
        assert!(!parsed.flags.has_alpha_slices());
        assert!(!parsed.is_uastc());
    }

    #[test]
    fn test_reject_truncated_and_bad_signature() {
        let bytes = sample().to_bytes().unwrap();
        assert!(matches!(BasisFileHeader::parse(&bytes[..40]), Err(Error::InvalidHeader)));
        assert!(matches!(BasisFileHeader::parse(&[]), Err(Error::InvalidHeader)));

        let mut corrupt = bytes.clone();
        corrupt[0] = b'X';
        assert!(matches!(BasisFileHeader::parse(&corrupt), Err(Error::InvalidHeader)));
    }
}
