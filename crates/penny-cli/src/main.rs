//! Penny CLI - Conversational personal finance buddy
//!
//! Usage:
//!   penny dashboard             Connect accounts and show the dashboard
//!   penny assistant             Talk to the option-driven assistant
//!   penny chat                  Ask Penny about your spending in free text
//!   penny demo roast-spending   Play a scripted demo

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use clap::Parser;
use penny_core::{Config, Playback, ScreenCatalog};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let playback = Playback::from_config(&config, cli.instant);
    let catalog = ScreenCatalog::builtin().context("Failed to load built-in screens")?;

    match cli.command {
        Commands::Dashboard { category, data } => {
            commands::cmd_dashboard(&catalog, &config, &data, category.as_deref(), &playback).await
        }
        Commands::Transactions {
            limit,
            category,
            data,
        } => commands::cmd_transactions(&config, &data, limit, category.as_deref()),
        Commands::Export {
            format,
            output,
            data,
        } => commands::cmd_export(&config, &data, &format, output.as_deref()),
        Commands::Ask { text } => commands::cmd_ask(&config, &text),
        Commands::Chat => commands::cmd_chat(&config, &playback).await,
        Commands::Assistant => commands::cmd_assistant(&catalog, &config, &playback).await,
        Commands::Demos => commands::cmd_demos(&catalog),
        Commands::Demo { id } => commands::cmd_demo(&catalog, &id, &config, &playback).await,
        Commands::Screens { action } => match action {
            None | Some(ScreensAction::List) => commands::cmd_screens_list(&catalog),
            Some(ScreensAction::Show { id }) => commands::cmd_screens_show(&catalog, &id),
        },
        Commands::Config => commands::cmd_config(&config),
    }
}
