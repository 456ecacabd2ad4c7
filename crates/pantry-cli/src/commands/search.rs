//! Recipe search command

use anyhow::{Context, Result};
use pantry_core::{AppConfig, Hit, RecipeSearchClient, RecipeSource, Session};
use tracing::debug;

/// Search recipes by dish name and print them
pub async fn cmd_search(query: &str) -> Result<()> {
    let config = AppConfig::load().context("Failed to load config")?;
    let client = RecipeSearchClient::from_config(&config.search)
        .context("Recipe search needs EDAMAM_APP_ID and EDAMAM_APP_KEY")?;
    debug!(host = client.base_url(), "Using recipe search API");

    println!("🔍 Searching recipes for \"{}\"...\n", query.trim());

    let session = run_search(&client, query).await;

    if let Some(error) = session.error() {
        println!("⚠️  {}", error);
        return Ok(());
    }

    for hit in session.recipes() {
        println!("{}", format_hit(hit));
    }
    println!("\n{} recipe(s)", session.recipes().len());

    Ok(())
}

/// Run a search through a fresh session
pub async fn run_search<S>(source: &S, query: &str) -> Session
where
    S: RecipeSource + ?Sized,
{
    let mut session = Session::new();
    session.set_query(query);
    session.search(source).await;
    debug!(
        query = %session.query(),
        hits = session.recipes().len(),
        error = ?session.error(),
        "Search finished"
    );
    session
}

/// One recipe as printed by `search`
pub fn format_hit(hit: &Hit) -> String {
    let recipe = &hit.recipe;
    format!(
        "  {}  ({} kcal)\n    {}",
        recipe.label,
        recipe.display_calories(),
        recipe.url
    )
}
