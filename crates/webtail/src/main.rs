mod application;
mod cli;
mod config;
mod domain;
mod errors;
mod handlers;
mod models;
mod service;
mod utils;

use clap::Parser;
use cli::Cli;
use handlers::run;
use utils::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Must precede into_config: resolving the fixed file can log a warning
    logging::init_logging(cli.log_format)?;

    let config = cli.into_config().await?;

    if let Err(e) = run(config).await {
        tracing::error!("Failed to run web tail server: {}", e);
        return Err(e);
    }

    Ok(())
}
