//! Session state and user actions
//!
//! A [`Session`] holds everything a front end renders: the dish name, the
//! ingredient list, the latest results, and the loading/error flags. Each user
//! action is one `async` method taking `&mut self`, so a session can never have
//! two requests in flight and a stale response can never land on top of a
//! newer one.
//!
//! The two flows are reached through traits so front ends can plug in the
//! search client and the relay client, and tests can plug in fakes:
//! - [`RecipeSource`]: recipe search
//! - [`RecipeGenerator`]: AI recipe generation through the relay

use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;
use crate::models::{AiRecipe, Hit, IngredientList, SearchQuery};
use crate::prompts::build_prompt;

/// Shown when a search returns no hits
pub const NO_RECIPES_FOUND: &str = "No recipes found. Try different ingredients or dish name.";

/// Shown when the recipe source fails outright
pub const SEARCH_FAILED: &str = "Failed to fetch recipes. Please try again later.";

/// Shown when AI generation fails for any reason
pub const AI_FAILED: &str = "AI failed to generate a recipe.";

/// Source of recipe search results
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Search for recipes matching a non-empty query
    async fn fetch_recipes(&self, query: &str) -> Result<Vec<Hit>>;
}

/// Generator of AI recipes from a prompt
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Return the generated recipe as non-empty lines
    async fn generate(&self, prompt: &str) -> Result<Vec<String>>;
}

/// Which result panel is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Search,
    Ai,
}

/// What a front end should render for the current state
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    /// A request is in flight
    Loading,
    /// Search results
    Recipes(&'a [Hit]),
    /// A generated recipe
    AiRecipe(&'a AiRecipe),
    /// Nothing searched yet: show suggestions
    Suggestions,
    /// Nothing to show besides the error message, if any
    Nothing,
}

/// Per-user session state
#[derive(Debug, Default)]
pub struct Session {
    query: String,
    ingredients: IngredientList,
    recipes: Vec<Hit>,
    ai_recipe: Option<AiRecipe>,
    mode: DisplayMode,
    loading: bool,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dish name
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn ingredients(&self) -> &IngredientList {
        &self.ingredients
    }

    /// Add a typed ingredient (trimmed, lower-cased, de-duplicated)
    pub fn add_ingredient(&mut self, input: &str) -> bool {
        self.ingredients.add(input)
    }

    /// Add one of the suggested ingredients
    pub fn add_suggested(&mut self, item: &str) -> bool {
        self.ingredients.add(item)
    }

    /// Remove the ingredient at `index`
    pub fn remove_ingredient(&mut self, index: usize) -> Option<String> {
        self.ingredients.remove(index)
    }

    pub fn recipes(&self) -> &[Hit] {
        &self.recipes
    }

    pub fn ai_recipe(&self) -> Option<&AiRecipe> {
        self.ai_recipe.as_ref()
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current inputs as a query
    pub fn search_query(&self) -> SearchQuery {
        SearchQuery::new(&self.query, self.ingredients.clone())
    }

    /// Run a recipe search for the current dish name
    ///
    /// Does nothing when the dish name is blank.
    pub async fn search<S>(&mut self, source: &S)
    where
        S: RecipeSource + ?Sized,
    {
        if self.query.trim().is_empty() {
            return;
        }

        self.begin(DisplayMode::Search);

        match source.fetch_recipes(self.query.trim()).await {
            Ok(hits) => {
                if hits.is_empty() {
                    self.error = Some(NO_RECIPES_FOUND.to_string());
                }
                self.recipes = hits;
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch recipes");
                self.error = Some(SEARCH_FAILED.to_string());
            }
        }

        self.loading = false;
    }

    /// Ask the AI for a recipe from the current dish name and ingredients
    ///
    /// Does nothing when both are empty.
    pub async fn ask_ai<G>(&mut self, generator: &G)
    where
        G: RecipeGenerator + ?Sized,
    {
        let Some(prompt) = build_prompt(&self.query, &self.ingredients) else {
            return;
        };

        self.begin(DisplayMode::Ai);

        match generator.generate(&prompt).await {
            Ok(lines) => {
                self.ai_recipe = Some(AiRecipe::from_lines(&self.query, &lines));
            }
            Err(e) => {
                warn!(error = %e, "AI error");
                self.error = Some(AI_FAILED.to_string());
            }
        }

        self.loading = false;
    }

    /// What to render right now
    pub fn view(&self) -> View<'_> {
        if self.loading {
            return View::Loading;
        }

        match self.mode {
            DisplayMode::Ai => match &self.ai_recipe {
                Some(recipe) => View::AiRecipe(recipe),
                None => View::Nothing,
            },
            DisplayMode::Search if !self.recipes.is_empty() => View::Recipes(&self.recipes),
            DisplayMode::Search if self.error.is_none() => View::Suggestions,
            DisplayMode::Search => View::Nothing,
        }
    }

    /// Reset per-request state; previous results are discarded
    fn begin(&mut self, mode: DisplayMode) {
        self.loading = true;
        self.error = None;
        self.mode = mode;
        self.recipes.clear();
        self.ai_recipe = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::RecipeSummary;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Recipe source returning a fixed outcome and recording queries
    struct FakeSource {
        hits: Option<Vec<Hit>>,
        queries: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn returning(hits: Vec<Hit>) -> Self {
            Self {
                hits: Some(hits),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                hits: None,
                queries: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.queries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RecipeSource for FakeSource {
        async fn fetch_recipes(&self, query: &str) -> Result<Vec<Hit>> {
            self.queries.lock().unwrap().push(query.to_string());
            self.hits
                .clone()
                .ok_or_else(|| Error::InvalidData("response has no hits".into()))
        }
    }

    /// Generator returning fixed lines, or failing
    struct FakeGenerator {
        lines: Option<Vec<String>>,
        prompts: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl FakeGenerator {
        fn returning(lines: &[&str]) -> Self {
            Self {
                lines: Some(lines.iter().map(|l| l.to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                lines: None,
                prompts: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RecipeGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.lines.clone().ok_or(Error::Upstream {
                status: 500,
                message: "Empty response from AI".into(),
            })
        }
    }

    fn hit(label: &str) -> Hit {
        Hit {
            recipe: RecipeSummary {
                label: label.to_string(),
                calories: 420.0,
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_search_blank_query_does_nothing() {
        let source = FakeSource::returning(vec![hit("Soup")]);
        let mut session = Session::new();
        session.set_query("   ");

        session.search(&source).await;

        assert_eq!(source.calls(), 0);
        assert!(session.recipes().is_empty());
        assert!(session.error().is_none());
        assert!(!session.is_loading());
        assert_eq!(session.view(), View::Suggestions);
    }

    #[tokio::test]
    async fn test_search_with_results() {
        let source = FakeSource::returning(vec![hit("Pasta"), hit("Pasta Bake")]);
        let mut session = Session::new();
        session.set_query(" pasta ");

        session.search(&source).await;

        assert_eq!(source.queries.lock().unwrap().as_slice(), &["pasta".to_string()]);
        assert_eq!(session.recipes().len(), 2);
        assert!(session.error().is_none());
        assert!(!session.is_loading());
        assert_eq!(session.mode(), DisplayMode::Search);
        assert!(matches!(session.view(), View::Recipes(r) if r.len() == 2));
    }

    #[tokio::test]
    async fn test_search_zero_hits_sets_message() {
        let source = FakeSource::returning(vec![]);
        let mut session = Session::new();
        session.set_query("zzzz");

        session.search(&source).await;

        assert!(session.recipes().is_empty());
        assert_eq!(session.error(), Some(NO_RECIPES_FOUND));
        assert!(!session.is_loading());
        assert_eq!(session.view(), View::Nothing);
    }

    #[tokio::test]
    async fn test_search_failure_sets_message() {
        let source = FakeSource::failing();
        let mut session = Session::new();
        session.set_query("pasta");

        session.search(&source).await;

        assert_eq!(session.error(), Some(SEARCH_FAILED));
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_ask_ai_requires_some_input() {
        let generator = FakeGenerator::returning(&["x"]);
        let mut session = Session::new();

        session.ask_ai(&generator).await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.mode(), DisplayMode::Search);
        assert!(session.ai_recipe().is_none());
    }

    #[tokio::test]
    async fn test_ask_ai_with_ingredients_only() {
        let generator = FakeGenerator::returning(&["Omelette", "1. Whisk eggs"]);
        let mut session = Session::new();
        session.add_ingredient("Egg");
        session.add_suggested("Cheese");

        session.ask_ai(&generator).await;

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].starts_with("I have the following ingredients: egg, cheese."));

        let recipe = session.ai_recipe().unwrap();
        assert_eq!(recipe.label, "AI Recipe");
        assert_eq!(recipe.description, "Omelette\n1. Whisk eggs");
        assert_eq!(session.mode(), DisplayMode::Ai);
        assert!(!session.is_loading());
        assert_eq!(session.view(), View::AiRecipe(recipe));
    }

    #[tokio::test]
    async fn test_ask_ai_failure_sets_message() {
        let generator = FakeGenerator::failing();
        let mut session = Session::new();
        session.set_query("pasta");

        session.ask_ai(&generator).await;

        assert_eq!(session.error(), Some(AI_FAILED));
        assert!(session.ai_recipe().is_none());
        assert!(!session.is_loading());
        assert_eq!(session.view(), View::Nothing);
    }

    #[tokio::test]
    async fn test_modes_switch_and_discard_previous_results() {
        let source = FakeSource::returning(vec![hit("Pasta")]);
        let generator = FakeGenerator::returning(&["Step 1"]);
        let mut session = Session::new();
        session.set_query("pasta");

        session.ask_ai(&generator).await;
        assert_eq!(session.ai_recipe().unwrap().label, "AI Recipe: pasta");

        session.search(&source).await;
        assert_eq!(session.mode(), DisplayMode::Search);
        assert!(session.ai_recipe().is_none());
        assert_eq!(session.recipes().len(), 1);

        session.ask_ai(&generator).await;
        assert_eq!(session.mode(), DisplayMode::Ai);
        assert!(session.recipes().is_empty());
    }

    #[tokio::test]
    async fn test_new_request_clears_previous_error() {
        let mut session = Session::new();
        session.set_query("pasta");

        session.search(&FakeSource::returning(vec![])).await;
        assert!(session.error().is_some());

        session.search(&FakeSource::returning(vec![hit("Pasta")])).await;
        assert!(session.error().is_none());
    }

    #[test]
    fn test_ingredient_add_remove() {
        let mut session = Session::new();
        assert!(session.add_ingredient("Tomato"));
        assert!(!session.add_ingredient("tomato"));
        session.add_ingredient("basil");
        session.add_ingredient("garlic");

        assert_eq!(session.remove_ingredient(0), Some("tomato".to_string()));
        assert_eq!(
            session.ingredients().as_slice(),
            &["basil".to_string(), "garlic".to_string()]
        );
        assert_eq!(session.search_query().ingredients.len(), 2);
    }
}
