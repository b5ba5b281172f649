//! Main entry point for the application.
//!
//! Initializes logging, loads environment variables, resolves the service
//! configuration and serves the authors/books HTTP API.

mod api;
mod cli;
mod config;
mod db;
mod errors;
mod schema;
mod utils;

use clap::Parser;
use config::ServiceConfig;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    utils::init_logging(&cli.logging_level, cli.log_file);

    if let Err(e) = dotenvy::dotenv() {
        warn!("Failed to load .env file: {}", e);
    }

    let config = ServiceConfig::from_cli(&cli);
    info!("Starting API server on {}", config.socket_addr());

    match api::server::launch_server(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
