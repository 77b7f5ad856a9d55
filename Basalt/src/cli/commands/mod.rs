use clap::Subcommand;
use std::path::PathBuf;

pub mod execute;
pub mod formats;
pub mod info;
pub mod transcode;
pub mod webp;

#[derive(Subcommand)]
pub enum Commands {
    /// List transcoding target formats
    Formats,

    /// Show header and level information of a .basis file
    Info {
        /// Source .basis file
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Transcode a .basis file to DDS or PNG
    Transcode {
        /// Source .basis file
        #[arg(short, long)]
        source: PathBuf,

        /// Output file (.dds or .png)
        #[arg(short, long)]
        destination: PathBuf,

        /// Target format name (see `basalt formats`). Default: RGBA8
        #[arg(short, long)]
        format: Option<String>,

        /// Importer configuration file (TOML, `format = "..."`)
        #[arg(short, long, conflicts_with = "format")]
        config: Option<PathBuf>,

        /// Image index
        #[arg(long, default_value_t = 0)]
        image: u32,

        /// Mip level
        #[arg(long, conflicts_with = "all_levels")]
        level: Option<u32>,

        /// Write every mip level, suffixing file names with `_L<n>`
        #[arg(long)]
        all_levels: bool,

        /// Use the slower, higher quality transcoding paths
        #[arg(long)]
        high_quality: bool,
    },

    /// Convert a WebP image to PNG
    WebpToPng {
        /// Source .webp file
        #[arg(short, long)]
        source: PathBuf,

        /// Output .png file
        #[arg(short, long)]
        destination: PathBuf,

        /// Suppress warnings
        #[arg(short, long)]
        quiet: bool,
    },
}
