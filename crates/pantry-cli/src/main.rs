//! Pantry CLI - Recipe finder
//!
//! Usage:
//!   pantry serve --port 3000          Start the relay server
//!   pantry search "pasta"             Search recipes
//!   pantry ask -d pasta -i tomato     Ask the AI through the relay
//!   pantry prompt -i egg -i cheese    Show the prompt that would be sent

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Serve {
            port,
            host,
            static_dir,
            allow_origins,
        } => commands::cmd_serve(&host, port, static_dir.as_deref(), allow_origins).await,
        Commands::Search { query } => commands::cmd_search(&query).await,
        Commands::Ask {
            dish,
            ingredients,
            server,
        } => commands::cmd_ask(dish.as_deref(), &ingredients, &server).await,
        Commands::Prompt { dish, ingredients } => {
            commands::cmd_prompt(dish.as_deref(), &ingredients)
        }
        Commands::Suggestions => commands::cmd_suggestions(),
    }
}
