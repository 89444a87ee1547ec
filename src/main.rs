//! menu-cache CLI entry point.

use clap::Parser;

use menu_cache::cli::{handle_error, load_config, Cli};
use menu_cache::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err.context("Failed to initialize logging"), cli.json),
    };

    if let Err(err) = menu_cache::cli::commands::menu::execute(cli.command, &config, cli.json).await {
        handle_error(err, cli.json);
    }
}
