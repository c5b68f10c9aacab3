//! CLI entry point for the strip tiling search

use clap::Parser;
use striptile::io::cli::{Cli, Runner};
use tracing_subscriber::EnvFilter;

fn main() -> striptile::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut runner = Runner::new(cli);
    runner.process()
}
