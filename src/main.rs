#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod app;
mod cli;

use cli::commands::Cli;
use response_composer::Config;
use response_composer::config::expand_path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref().map(expand_path);
    let config = Config::load(config_path.as_deref()).context("Failed to load config")?;

    // Logs go to stderr so stdout stays machine-readable JSON.
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.logging.level.into()
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    app::dispatch::dispatch(cli, &config)
}
