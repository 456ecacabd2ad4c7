//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default relay server for `ask`
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:3000";

/// Pantry - Find recipes from what you have
#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Recipe search and AI recipe generation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the relay server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory with static front-end files
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Allowed CORS origin (repeatable)
        #[arg(long = "allow-origin")]
        allow_origins: Vec<String>,
    },

    /// Search recipes by dish name
    Search {
        /// Dish name
        query: String,
    },

    /// Ask the AI for a recipe (through the relay server)
    Ask {
        /// Dish name
        #[arg(short, long)]
        dish: Option<String>,

        /// Ingredient you have (repeatable)
        #[arg(short, long = "ingredient")]
        ingredients: Vec<String>,

        /// Relay server URL
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },

    /// Print the prompt that `ask` would send
    Prompt {
        /// Dish name
        #[arg(short, long)]
        dish: Option<String>,

        /// Ingredient you have (repeatable)
        #[arg(short, long = "ingredient")]
        ingredients: Vec<String>,
    },

    /// List suggested ingredients
    Suggestions,
}
