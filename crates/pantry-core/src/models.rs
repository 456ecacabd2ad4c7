//! Data models for Pantry

use serde::{Deserialize, Serialize};

/// A recipe as returned by the recipe search API
///
/// Fields are taken as-is from the upstream `recipe` object. Missing fields
/// default rather than failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub url: String,
}

impl RecipeSummary {
    /// Calories rounded for display
    pub fn display_calories(&self) -> i64 {
        self.calories.round() as i64
    }
}

/// One result entry from the recipe search API, wrapping a recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub recipe: RecipeSummary,
}

/// A recipe generated by the language model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiRecipe {
    pub label: String,
    /// Newline-joined model output
    pub description: String,
}

impl AiRecipe {
    /// Build from the relay's lines, labelled after the dish name when present
    pub fn from_lines(query: &str, lines: &[String]) -> Self {
        let query = query.trim();
        let label = if query.is_empty() {
            "AI Recipe".to_string()
        } else {
            format!("AI Recipe: {}", query)
        };

        Self {
            label,
            description: lines.join("\n"),
        }
    }
}

/// Ordered set of ingredient names
///
/// Entries are trimmed and lower-cased on insert. Empty entries and
/// case-insensitive duplicates are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngredientList(Vec<String>);

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ingredient, returning whether it was stored
    pub fn add(&mut self, input: &str) -> bool {
        let normalized = input.trim().to_lowercase();
        if normalized.is_empty() || self.0.contains(&normalized) {
            return false;
        }
        self.0.push(normalized);
        true
    }

    /// Remove the entry at `index`, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-separated form used in prompts
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.add(item.as_ref());
        }
        list
    }
}

/// Dish name plus ingredients, the input to both flows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub dish: String,
    pub ingredients: IngredientList,
}

impl SearchQuery {
    pub fn new(dish: &str, ingredients: IngredientList) -> Self {
        Self {
            dish: dish.to_string(),
            ingredients,
        }
    }

    /// Whether a dish name was entered
    pub fn has_dish(&self) -> bool {
        !self.dish.trim().is_empty()
    }
}
