use clap::Parser;
use tracing_subscriber::EnvFilter;

use igv_tool::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flags
    let filter = if cli.verbose || cli.debug {
        EnvFilter::new("igv_tool=debug,info")
    } else {
        EnvFilter::new("igv_tool=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    cli::launch::run(cli)
}
