//! Basis Universal engine, backed by the `basis-universal` crate

use basis_universal::transcoding::{
    DecodeFlags as BasisuDecodeFlags, TranscodeError, TranscodeParameters,
    Transcoder as BasisuSession, TranscoderTextureFormat,
};

use super::codebook::Codebook;
use super::engine::{
    DecodeFlags, EngineError, FileSummary, ImageInfo, LevelDesc, TranscodeRequest, Transcoder,
};
use crate::formats::target::TargetFormat;

/// Engine texture format for a target
///
/// Both BC7 targets map to the single BC7 RGBA mode of the engine.
fn engine_format(format: TargetFormat) -> TranscoderTextureFormat {
    match format {
        TargetFormat::Etc1RGB => TranscoderTextureFormat::ETC1_RGB,
        TargetFormat::Etc2RGBA => TranscoderTextureFormat::ETC2_RGBA,
        TargetFormat::Bc1RGB => TranscoderTextureFormat::BC1_RGB,
        TargetFormat::Bc3RGBA => TranscoderTextureFormat::BC3_RGBA,
        TargetFormat::Bc4R => TranscoderTextureFormat::BC4_R,
        TargetFormat::Bc5RG => TranscoderTextureFormat::BC5_RG,
        TargetFormat::Bc7RGB | TargetFormat::Bc7RGBA => TranscoderTextureFormat::BC7_RGBA,
        TargetFormat::PvrtcRGB4bpp => TranscoderTextureFormat::PVRTC1_4_RGB,
        TargetFormat::PvrtcRGBA4bpp => TranscoderTextureFormat::PVRTC1_4_RGBA,
        TargetFormat::Astc4x4RGBA => TranscoderTextureFormat::ASTC_4x4_RGBA,
        TargetFormat::RGBA8 => TranscoderTextureFormat::RGBA32,
        TargetFormat::EacR => TranscoderTextureFormat::ETC2_EAC_R11,
        TargetFormat::EacRG => TranscoderTextureFormat::ETC2_EAC_RG11,
    }
}

fn engine_decode_flags(flags: DecodeFlags) -> Option<BasisuDecodeFlags> {
    if flags.is_empty() {
        return None;
    }
    let mut out = BasisuDecodeFlags::empty();
    if flags.high_quality {
        out |= BasisuDecodeFlags::HIGH_QUALITY;
    }
    if flags.bc1_forbid_three_color_blocks {
        out |= BasisuDecodeFlags::BC1_FORBID_THREE_COLOR_BLOCKS;
    }
    if flags.alpha_to_opaque {
        out |= BasisuDecodeFlags::TRANSCODE_ALPHA_DATA_TO_OPAQUE_FORMATS;
    }
    Some(out)
}

/// Whether the engine can transcode to `format` safely
///
/// `basis-universal` 0.3 corrupts its heap and aborts the process on PVRTC1
/// output, even for power-of-two levels.
fn is_engine_supported(format: TargetFormat) -> bool {
    !matches!(
        format,
        TargetFormat::PvrtcRGB4bpp | TargetFormat::PvrtcRGBA4bpp
    )
}

fn engine_error(err: TranscodeError, request: &TranscodeRequest) -> EngineError {
    match err {
        TranscodeError::TranscodeFormatNotSupported => {
            EngineError::FormatNotSupported(request.format)
        }
        TranscodeError::ImageLevelNotFound => EngineError::LevelNotFound {
            image: request.image,
            level: request.level,
        },
        TranscodeError::TranscodeFailed => EngineError::Failed(format!("{err:?}")),
    }
}

/// Session of the Basis Universal transcoder
pub struct BasisuTranscoder {
    session: BasisuSession,
}

impl Transcoder for BasisuTranscoder {
    fn new(codebook: &'static Codebook) -> Self {
        tracing::trace!("New basisu session ({} tables)", codebook.engine());
        Self {
            session: BasisuSession::new(),
        }
    }

    fn validate_header(&self, data: &[u8]) -> bool {
        self.session.validate_header(data)
    }

    fn file_summary(&self, data: &[u8]) -> Option<FileSummary> {
        let info = self.session.file_info(data)?;
        let image_count = info.m_total_images;
        let level_counts = (0..image_count)
            .map(|image| self.session.image_level_count(data, image))
            .collect();

        Some(FileSummary {
            image_count,
            level_counts,
            y_flipped: info.m_y_flipped,
        })
    }

    fn start_transcoding(&mut self, data: &[u8]) -> bool {
        self.session.prepare_transcoding(data).is_ok()
    }

    fn stop_transcoding(&mut self) {
        self.session.end_transcoding();
    }

    fn image_info(&self, data: &[u8], image: u32) -> Option<ImageInfo> {
        let level_count = self.session.image_level_count(data, image);
        if level_count == 0 {
            return None;
        }
        let base = self.level_desc(data, image, 0)?;
        Some(ImageInfo {
            level_count,
            width: base.width,
            height: base.height,
        })
    }

    fn level_desc(&self, data: &[u8], image: u32, level: u32) -> Option<LevelDesc> {
        self.session
            .image_level_description(data, image, level)
            .map(|desc| LevelDesc {
                width: desc.original_width,
                height: desc.original_height,
                total_blocks: desc.block_count,
            })
    }

    fn transcode_level(
        &self,
        data: &[u8],
        request: &TranscodeRequest,
        output: &mut [u8],
    ) -> Result<(), EngineError> {
        if !is_engine_supported(request.format) {
            return Err(EngineError::FormatNotSupported(request.format));
        }

        let parameters = TranscodeParameters {
            image_index: request.image,
            level_index: request.level,
            decode_flags: engine_decode_flags(request.decode_flags),
            output_row_pitch_in_blocks_or_pixels: request.row_stride,
            output_rows_in_pixels: request.output_rows,
        };

        let transcoded = self
            .session
            .transcode_image_level(data, engine_format(request.format), parameters)
            .map_err(|err| engine_error(err, request))?;

        if transcoded.len() != output.len() {
            return Err(EngineError::OutputSizeMismatch {
                expected: output.len(),
                actual: transcoded.len(),
            });
        }
        output.copy_from_slice(&transcoded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::codebook;
    use pretty_assertions::assert_eq;

    const ETC1S: &[u8] = include_bytes!("../../tests/fixtures/rust-logo-etc.basis");

    fn request(format: TargetFormat, level: u32) -> TranscodeRequest {
        TranscodeRequest {
            image: 0,
            level,
            format,
            row_stride: None,
            output_rows: None,
            unit_count: 256,
            decode_flags: DecodeFlags::default(),
        }
    }

    #[test]
    fn test_rejects_garbage() {
        let session = BasisuTranscoder::new(codebook::initialize());
        assert!(!session.validate_header(b"this is not a basis file at all"));
        assert!(!session.validate_header(&[0u8; 128]));
        assert_eq!(session.file_summary(&[0u8; 128]), None);
    }

    #[test]
    fn test_summary_of_etc1s_file() {
        let session = BasisuTranscoder::new(codebook::initialize());
        assert!(session.validate_header(ETC1S));
        let summary = session.file_summary(ETC1S).unwrap();
        assert_eq!(summary.image_count, 1);
        assert_eq!(summary.level_counts, vec![7]);
        assert!(!summary.y_flipped);

        let base = session.level_desc(ETC1S, 0, 0).unwrap();
        assert_eq!((base.width, base.height, base.total_blocks), (64, 64, 256));
        assert_eq!(session.level_desc(ETC1S, 0, 7), None);
    }

    #[test]
    fn test_pvrtc_is_refused() {
        let mut session = BasisuTranscoder::new(codebook::initialize());
        assert!(session.start_transcoding(ETC1S));

        for format in [TargetFormat::PvrtcRGB4bpp, TargetFormat::PvrtcRGBA4bpp] {
            let mut output = vec![0u8; 256 * 8];
            assert_eq!(
                session.transcode_level(ETC1S, &request(format, 0), &mut output),
                Err(EngineError::FormatNotSupported(format))
            );
        }

        // The session keeps working afterwards
        let mut output = vec![0u8; 256 * 8];
        assert_eq!(
            session.transcode_level(ETC1S, &request(TargetFormat::Bc1RGB, 0), &mut output),
            Ok(())
        );
        session.stop_transcoding();
    }

    #[test]
    fn test_missing_level_maps_to_level_not_found() {
        let mut session = BasisuTranscoder::new(codebook::initialize());
        assert!(session.start_transcoding(ETC1S));
        let mut output = vec![0u8; 8];
        assert_eq!(
            session.transcode_level(ETC1S, &request(TargetFormat::Bc1RGB, 9), &mut output),
            Err(EngineError::LevelNotFound { image: 0, level: 9 })
        );
        session.stop_transcoding();
    }

    #[test]
    fn test_engine_error_mapping() {
        let request = request(TargetFormat::Etc2RGBA, 2);
        assert_eq!(
            engine_error(TranscodeError::TranscodeFormatNotSupported, &request),
            EngineError::FormatNotSupported(TargetFormat::Etc2RGBA)
        );
        assert_eq!(
            engine_error(TranscodeError::ImageLevelNotFound, &request),
            EngineError::LevelNotFound { image: 0, level: 2 }
        );
        assert!(matches!(
            engine_error(TranscodeError::TranscodeFailed, &request),
            EngineError::Failed(_)
        ));
    }
}
