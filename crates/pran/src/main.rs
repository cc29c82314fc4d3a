//! Pran - Entry Point
//!
//! Loads configuration, installs logging and runs one command.

use std::process::ExitCode;

use clap::Parser;
use pran::cli::{self, Cli};
use pran_infrastructure::logging::init_logging;
use pran_infrastructure::{AppContext, ConfigLoader};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(&config.logging)?;

    cli::run(cli.command, &AppContext::new(config)).await
}
