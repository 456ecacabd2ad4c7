//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `ask` - AI recipe generation through the relay server
//! - `prompt` - Prompt preview and suggested ingredients
//! - `search` - Recipe search
//! - `serve` - Relay server command

pub mod ask;
pub mod prompt;
pub mod search;
pub mod serve;

// Re-export command functions for main.rs
pub use ask::*;
pub use prompt::*;
pub use search::*;
pub use serve::*;

use pantry_core::Session;

/// Session pre-filled with a dish name and ingredients
pub fn session_from_inputs(dish: Option<&str>, ingredients: &[String]) -> Session {
    let mut session = Session::new();
    if let Some(dish) = dish {
        session.set_query(dish);
    }
    for item in ingredients {
        session.add_ingredient(item);
    }
    session
}
