mod analysis;
mod cli;
mod config;
mod errors;
mod handlers;
mod matching;
mod models;
mod profiles;
mod state;
mod text;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::state::AppState;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (malformed values abort startup)
    let config = Config::from_env().context("failed to load configuration")?;

    // Initialize structured logging; stdout carries the JSON result only
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting matcher v{}", env!("CARGO_PKG_VERSION"));

    let outcome = AppState::build(config).and_then(|state| handlers::dispatch(&state, cli.command));

    match outcome {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", serde_json::to_string_pretty(&e.to_json())?);
            std::process::exit(e.exit_code());
        }
    }
}
