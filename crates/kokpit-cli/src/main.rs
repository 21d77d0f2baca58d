//! Kokpit CLI Application
//!
//! Command-line story editor for the kokpit project dashboard.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use kokpit_core::BackendBuilder;
use log::info;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        config_file,
        base_url,
        token,
        no_color,
        command,
    } = Args::parse();

    let backend = BackendBuilder::new()
        .with_config_file(config_file)
        .with_base_url(base_url)
        .with_token(token)
        .build()
        .context("Failed to initialize backend client")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Kokpit started against {}", backend.base_url());

    match command {
        Commands::Story { command } => {
            Cli::new(backend, renderer)
                .handle_story_command(command)
                .await
        }
    }
}
