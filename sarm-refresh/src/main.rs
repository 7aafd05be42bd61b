use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;
use tracing::error;

use crate::config::Cli;

mod commands;
mod config;
mod error;

const APP_NAME: &str = "sarm-refresh";

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = sarm_common::tracing::init_tracing(APP_NAME) {
        eprintln!("could not initialize tracing: {e}");
        return ExitCode::FAILURE;
    }

    match commands::execute(&cli.command, &cli.config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}
