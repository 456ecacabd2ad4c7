//! Prompt preview and suggested ingredients

use anyhow::{Context, Result};
use pantry_core::{AppConfig, PromptTemplate};

use super::session_from_inputs;

/// Print the prompt `ask` would send for these inputs
pub fn cmd_prompt(dish: Option<&str>, ingredients: &[String]) -> Result<()> {
    match render_prompt(dish, ingredients) {
        Some((template, prompt)) => {
            println!("Template: {}\n", template.as_str());
            println!("{}", prompt);
        }
        None => {
            println!("Nothing to ask: provide --dish and/or --ingredient");
        }
    }
    Ok(())
}

/// Template and prompt for these inputs, if any
pub fn render_prompt(dish: Option<&str>, ingredients: &[String]) -> Option<(PromptTemplate, String)> {
    let query = session_from_inputs(dish, ingredients).search_query();
    let template = PromptTemplate::select(&query.dish, &query.ingredients)?;
    Some((template, template.render(&query.dish, &query.ingredients)))
}

/// Print the suggested ingredient list
pub fn cmd_suggestions() -> Result<()> {
    let config = AppConfig::load().context("Failed to load config")?;

    println!("Suggested ingredients:\n");
    for item in &config.suggested_ingredients {
        println!("  + {}", item);
    }

    Ok(())
}
