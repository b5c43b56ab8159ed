mod cli;
mod commands;
mod config;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run_app().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("scanbeam v{} starting up", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let result = match cli.command {
        Commands::Prepare(args) => commands::prepare::run(args).await,
        Commands::Translate(args) => commands::translate::run(args).await,
        Commands::Init(args) => commands::init::run(args).await,
    };

    if let Err(e) = &result {
        error!("Command failed: {}", e);
    }
    result
}
