//! Basalt CLI - command-line interface for Basis Universal textures

pub mod commands;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "basalt")]
#[command(about = "Basalt: inspect and transcode Basis Universal textures", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the Basalt CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_level_conflicts_with_all_levels() {
        let parsed = Cli::try_parse_from([
            "basalt", "transcode", "-s", "in.basis", "-d", "out.dds", "--level", "1", "--all-levels",
        ]);
        assert!(parsed.is_err());
    }
}
