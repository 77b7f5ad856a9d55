fn main() -> anyhow::Result<()> {
    basalt::cli::run_cli()
}
