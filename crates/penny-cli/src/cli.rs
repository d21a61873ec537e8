//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Penny - Your conversational personal finance buddy
#[derive(Parser)]
#[command(name = "penny")]
#[command(about = "Scripted conversational finance assistant prototype", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.config/penny/penny.toml, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip typing and reveal delays
    #[arg(long, global = true)]
    pub instant: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which synthetic dataset to load
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Generate a random month instead of the fixed fixture
    #[arg(long)]
    pub random: bool,

    /// Seed for random generation (implies --random)
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Connect (simulated) accounts and show the spending dashboard
    Dashboard {
        /// Drill into one category's transactions (e.g. shopping, food)
        #[arg(short, long)]
        category: Option<String>,

        #[command(flatten)]
        data: DataArgs,
    },

    /// List transactions
    Transactions {
        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Only show this category (e.g. shopping, food)
        #[arg(short, long)]
        category: Option<String>,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Export transactions to CSV or JSON
    Export {
        /// Output format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Ask Penny a single question about your spending
    Ask {
        /// The question, e.g. "where can I save money?"
        text: Vec<String>,
    },

    /// Chat with Penny in free text
    Chat,

    /// Talk to the option-driven assistant
    Assistant,

    /// List the scripted demos
    Demos,

    /// Play a scripted demo
    Demo {
        /// Demo ID (see `penny demos`)
        id: String,
    },

    /// Inspect screen definitions
    Screens {
        #[command(subcommand)]
        action: Option<ScreensAction>,
    },

    /// Show the effective configuration
    Config,
}

#[derive(Subcommand)]
pub enum ScreensAction {
    /// List all screens
    List,
    /// Dump a screen's intro and script table as JSON
    Show {
        /// Screen ID
        id: String,
    },
}
