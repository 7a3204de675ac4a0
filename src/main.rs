use clap::Parser;
use surfacekit::cli::{self, Cli};
use surfacekit::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;
    tracing::debug!(
        "surfacekit {} (built {})",
        surfacekit::VERSION,
        surfacekit::BUILD_DATE
    );

    cli::run(cli)
}
