//! AI recipe command
//!
//! Talks to the relay server only; the completion credential stays with the
//! server process.

use anyhow::{bail, Result};
use pantry_core::{RecipeGenerator, RelayClient, Session};
use tracing::debug;

use super::session_from_inputs;

/// Ask the relay for a recipe and print it
pub async fn cmd_ask(dish: Option<&str>, ingredients: &[String], server: &str) -> Result<()> {
    let client = RelayClient::new(server);

    println!("🤖 Asking AI via {}...\n", client.base_url());

    let session = run_ask(&client, dish, ingredients).await?;

    if let Some(error) = session.error() {
        println!("⚠️  {}", error);
        return Ok(());
    }

    if let Some(recipe) = session.ai_recipe() {
        println!("{}\n", recipe.label);
        println!("{}", recipe.description);
    }

    Ok(())
}

/// Run the AI flow through a fresh session
pub async fn run_ask<G>(generator: &G, dish: Option<&str>, ingredients: &[String]) -> Result<Session>
where
    G: RecipeGenerator + ?Sized,
{
    let mut session = session_from_inputs(dish, ingredients);
    let Some(prompt) = session.search_query().prompt() else {
        bail!("Provide a dish name (--dish) or at least one ingredient (--ingredient)");
    };
    debug!(prompt = %prompt, "Sending prompt to relay");

    session.ask_ai(generator).await;
    debug!(
        generated = session.ai_recipe().is_some(),
        error = ?session.error(),
        "AI request finished"
    );
    Ok(session)
}
