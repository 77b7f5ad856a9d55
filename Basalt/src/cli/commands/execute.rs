//! Command execution implementations

use super::Commands;
use super::{formats, info, transcode, webp};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Formats => {
                formats::execute();
                Ok(())
            }
            Commands::Info { source } => info::execute(source),
            Commands::Transcode {
                source,
                destination,
                format,
                config,
                image,
                level,
                all_levels,
                high_quality,
            } => transcode::execute(&transcode::TranscodeArgs {
                source,
                destination,
                format: format.as_deref(),
                config: config.as_deref(),
                image: *image,
                level: *level,
                all_levels: *all_levels,
                high_quality: *high_quality,
            }),
            Commands::WebpToPng {
                source,
                destination,
                quiet,
            } => webp::execute(source, destination, *quiet),
        }
    }
}
