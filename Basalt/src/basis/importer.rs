//! Basis Universal importer
//!
//! Opens a `.basis` container and transcodes its levels on demand into the
//! configured [`TargetFormat`].

use super::codebook::Codebook;
use super::engine::{DecodeFlags, FileSummary, LevelDesc, Transcoder};
use super::transcode::{self, LevelJob};
use crate::advisory::Advisory;
use crate::error::{Error, Result};
use crate::formats::basis::BasisFileHeader;
use crate::formats::target::{self, TargetFormat};
use crate::importer::{
    ContainerBytes, FORMAT_OPTION, ImageData2D, Importer, ImporterConfig, ImporterFeature,
    InputData,
};

/// Prefix shared by all importer aliases
pub const ALIAS_PREFIX: &str = "BasisImporter";

/// Alias identifiers, one per target format in table order
pub const ALIASES: [&str; TargetFormat::COUNT] = [
    "BasisImporterEtc1RGB",
    "BasisImporterEtc2RGBA",
    "BasisImporterBc1RGB",
    "BasisImporterBc3RGBA",
    "BasisImporterBc4R",
    "BasisImporterBc5RG",
    "BasisImporterBc7RGB",
    "BasisImporterBc7RGBA",
    "BasisImporterPvrtcRGB4bpp",
    "BasisImporterPvrtcRGBA4bpp",
    "BasisImporterAstc4x4RGBA",
    "BasisImporterRGBA8",
    "BasisImporterEacR",
    "BasisImporterEacRG",
];

const FEATURES: &[ImporterFeature] = &[ImporterFeature::OpenData];

/// An opened container: engine session plus the bytes it reads from
struct Container<T: Transcoder> {
    session: T,
    bytes: ContainerBytes,
    header: BasisFileHeader,
    summary: FileSummary,
    is_srgb: bool,
    /// Set once the missing-format advisory went out for this container
    no_format_warned: bool,
}

impl<T: Transcoder> Drop for Container<T> {
    fn drop(&mut self) {
        self.session.stop_transcoding();
    }
}

/// Metadata gathered while opening, before anything is committed
struct Staged {
    header: BasisFileHeader,
    summary: FileSummary,
}

/// Validate and start a session over `data`
///
/// On error the caller drops the session, which is all the rollback there is:
/// nothing outside the session has been touched yet.
fn stage<T: Transcoder>(session: &mut T, data: &[u8]) -> Result<Staged> {
    if !session.validate_header(data) {
        return Err(Error::InvalidHeader);
    }
    let header = BasisFileHeader::parse(data)?;
    let summary = session.file_summary(data).ok_or(Error::BadBasisFile)?;
    if !session.start_transcoding(data) {
        return Err(Error::BadBasisFile);
    }
    Ok(Staged { header, summary })
}

/// Importer for Basis Universal containers
///
/// The transcoding target comes from the `format` configuration option. When
/// it is empty, levels are imported as uncompressed RGBA8 and an advisory is
/// logged on the first import after each open.
pub struct BasisImporter<T: Transcoder> {
    codebook: &'static Codebook,
    config: ImporterConfig,
    decode_flags: DecodeFlags,
    container: Option<Container<T>>,
}

impl<T: Transcoder> BasisImporter<T> {
    /// Importer with an empty configuration
    #[must_use]
    pub fn new(codebook: &'static Codebook) -> Self {
        Self::with_config(codebook, ImporterConfig::new())
    }

    #[must_use]
    pub fn with_config(codebook: &'static Codebook, config: ImporterConfig) -> Self {
        Self {
            codebook,
            config,
            decode_flags: DecodeFlags::default(),
            container: None,
        }
    }

    /// Importer constructed under an alias such as `BasisImporterBc3RGBA`
    ///
    /// The `format` option is pre-set when the alias carries the
    /// `BasisImporter` prefix followed by a valid format name. Any other
    /// identifier leaves the configuration empty.
    #[must_use]
    pub fn with_alias(codebook: &'static Codebook, alias: &str) -> Self {
        let mut importer = Self::new(codebook);
        if let Some(format) = alias.strip_prefix(ALIAS_PREFIX).and_then(target::name_to_format) {
            tracing::debug!("Importer alias {alias} selects {format}");
            importer.set_target_format(format);
        }
        importer
    }

    #[must_use]
    pub fn configuration(&self) -> &ImporterConfig {
        &self.config
    }

    pub fn configuration_mut(&mut self) -> &mut ImporterConfig {
        &mut self.config
    }

    /// Select the transcoding target
    pub fn set_target_format(&mut self, format: TargetFormat) {
        self.config.set_value(FORMAT_OPTION, format.name());
    }

    /// The configured target, `None` when unset or not a valid name
    #[must_use]
    pub fn target_format(&self) -> Option<TargetFormat> {
        target::name_to_format(self.config.format())
    }

    pub fn set_decode_flags(&mut self, flags: DecodeFlags) {
        self.decode_flags = flags;
    }

    #[must_use]
    pub fn decode_flags(&self) -> DecodeFlags {
        self.decode_flags
    }

    /// Raw header of the opened container
    #[must_use]
    pub fn header(&self) -> Option<&BasisFileHeader> {
        self.container.as_ref().map(|container| &container.header)
    }

    /// Whether the opened container stores sRGB color data
    #[must_use]
    pub fn is_srgb(&self) -> Option<bool> {
        self.container.as_ref().map(|container| container.is_srgb)
    }

    /// Geometry of one level of the opened container
    #[must_use]
    pub fn level_desc(&self, id: u32, level: u32) -> Option<LevelDesc> {
        let container = self.container.as_ref()?;
        container.session.level_desc(&container.bytes, id, level)
    }

    fn opened(&self) -> &Container<T> {
        match &self.container {
            Some(container) => container,
            None => panic!("BasisImporter: no file opened"),
        }
    }
}

impl<T: Transcoder> Importer for BasisImporter<T> {
    fn features(&self) -> &'static [ImporterFeature] {
        FEATURES
    }

    fn is_opened(&self) -> bool {
        self.container.is_some()
    }

    fn close(&mut self) {
        if self.container.take().is_some() {
            tracing::debug!("Closed basis container");
        }
    }

    fn open_data(&mut self, data: InputData<'_>) -> Result<()> {
        self.close();

        if data.is_empty() {
            return Err(Error::EmptyFile);
        }

        let mut session = T::new(self.codebook);
        let staged = match stage(&mut session, data.as_slice()) {
            Ok(staged) => staged,
            Err(err) => {
                drop(session);
                tracing::debug!("Opening basis container failed, rolled back: {err}");
                return Err(err);
            }
        };

        // Commit
        let is_srgb = staged.header.flags.srgb();
        let adopted = data.is_transferable();
        let bytes = data.into_bytes();
        tracing::debug!(
            "Opened basis container: {} images, {} bytes {}, {}",
            staged.summary.image_count,
            bytes.len(),
            if adopted { "adopted" } else { "copied" },
            if is_srgb { "sRGB" } else { "linear" }
        );
        self.container = Some(Container {
            session,
            bytes,
            header: staged.header,
            summary: staged.summary,
            is_srgb,
            no_format_warned: false,
        });
        Ok(())
    }

    fn image2d_count(&self) -> u32 {
        self.container
            .as_ref()
            .map_or(0, |container| container.summary.image_count)
    }

    fn image2d_level_count(&self, id: u32) -> u32 {
        let summary = &self.opened().summary;
        assert!(
            id < summary.image_count,
            "BasisImporter: image {id} out of range for {} images",
            summary.image_count
        );
        summary.level_counts[id as usize]
    }

    fn image2d(&mut self, id: u32, level: u32) -> Result<ImageData2D> {
        let configured = self.config.format().to_string();
        let decode_flags = self.decode_flags;
        let container = self.container.as_mut().ok_or(Error::NotOpened)?;

        let format = if configured.is_empty() {
            if !container.no_format_warned {
                Advisory::NoTargetFormat.emit("BasisImporter::image2d()");
                container.no_format_warned = true;
            }
            TargetFormat::RGBA8
        } else {
            target::name_to_format(&configured).ok_or_else(|| Error::InvalidTargetFormat {
                image: id,
                name: configured.clone(),
                expected: target::expected_names(),
            })?
        };

        assert!(
            id < container.summary.image_count,
            "BasisImporter: image {id} out of range for {} images",
            container.summary.image_count
        );
        let level_count = container.summary.level_counts[id as usize];
        assert!(
            level < level_count,
            "BasisImporter: level {level} out of range for {level_count} levels"
        );

        let job = LevelJob {
            image: id,
            level,
            format,
            is_srgb: container.is_srgb,
            y_flipped: container.summary.y_flipped,
            decode_flags,
        };
        transcode::transcode_level(&container.session, &container.bytes, &job)
    }
}
