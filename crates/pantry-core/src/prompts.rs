//! Prompt construction for AI recipe generation
//!
//! One of three templates is picked from which inputs are present:
//!
//! | dish name | ingredients | template                |
//! |-----------|-------------|-------------------------|
//! | yes       | yes         | `RecipeWithIngredients` |
//! | no        | yes         | `IngredientsOnly`       |
//! | yes       | no          | `DishNameOnly`          |
//! | no        | no          | none, nothing is sent   |
//!
//! Each template keeps a numbered list of requested fields; the model's output
//! quality depends on those explicit requests.

use crate::models::{IngredientList, SearchQuery};

/// Known prompt templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    /// Recipe for a named dish using only the listed ingredients
    RecipeWithIngredients,
    /// Suggest a dish from the listed ingredients
    IngredientsOnly,
    /// Full recipe for a named dish
    DishNameOnly,
}

impl PromptTemplate {
    /// Pick the template for a dish name and ingredient list
    pub fn select(dish: &str, ingredients: &IngredientList) -> Option<Self> {
        match (!dish.trim().is_empty(), !ingredients.is_empty()) {
            (true, true) => Some(Self::RecipeWithIngredients),
            (false, true) => Some(Self::IngredientsOnly),
            (true, false) => Some(Self::DishNameOnly),
            (false, false) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RecipeWithIngredients => "recipe_with_ingredients",
            Self::IngredientsOnly => "ingredients_only",
            Self::DishNameOnly => "dish_name_only",
        }
    }

    /// Render this template
    pub fn render(&self, dish: &str, ingredients: &IngredientList) -> String {
        let dish = dish.trim();
        let ingredients = ingredients.joined();

        match self {
            Self::RecipeWithIngredients => format!(
                "Create a detailed recipe for \"{dish}\" using only the following ingredients: {ingredients}.\n\
                 \n\
                 For each ingredient, include:\n\
                 1. Quantity used\n\
                 2. Estimated calories before cooking\n\
                 3. Estimated calories after cooking\n\
                 \n\
                 Then, provide step-by-step cooking instructions with clear formatting."
            ),
            Self::IngredientsOnly => format!(
                "I have the following ingredients: {ingredients}.\n\
                 Please suggest a complete recipe using them.\n\
                 Include:\n\
                 1. Dish name\n\
                 2. Estimated calories before and after cooking\n\
                 3. Step-by-step instructions\n\
                 4. Ingredient quantities"
            ),
            Self::DishNameOnly => format!(
                "Generate a detailed recipe for \"{dish}\".\n\
                 Include:\n\
                 1. Ingredients list with quantities\n\
                 2. Estimated calories before and after cooking\n\
                 3. Step-by-step instructions."
            ),
        }
    }
}

/// Build the prompt for a dish name and ingredient list
///
/// Returns `None` when both are empty.
pub fn build_prompt(dish: &str, ingredients: &IngredientList) -> Option<String> {
    PromptTemplate::select(dish, ingredients).map(|t| t.render(dish, ingredients))
}

impl SearchQuery {
    /// Prompt for this query, if there is anything to ask for
    pub fn prompt(&self) -> Option<String> {
        build_prompt(&self.dish, &self.ingredients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredients(items: &[&str]) -> IngredientList {
        items.iter().collect()
    }

    #[test]
    fn test_select_template() {
        let some = ingredients(&["tomato"]);
        let none = IngredientList::new();

        assert_eq!(
            PromptTemplate::select("pasta", &some),
            Some(PromptTemplate::RecipeWithIngredients)
        );
        assert_eq!(
            PromptTemplate::select("", &some),
            Some(PromptTemplate::IngredientsOnly)
        );
        assert_eq!(
            PromptTemplate::select("pasta", &none),
            Some(PromptTemplate::DishNameOnly)
        );
        assert_eq!(PromptTemplate::select("", &none), None);
        assert_eq!(PromptTemplate::select("   ", &none), None);
    }

    #[test]
    fn test_recipe_with_ingredients_requests_all_fields() {
        let prompt = build_prompt("pasta", &ingredients(&["tomato", "cheese"])).unwrap();

        assert!(prompt.contains("\"pasta\""));
        assert!(prompt.contains("using only the following ingredients: tomato, cheese."));
        assert!(prompt.contains("1. Quantity used"));
        assert!(prompt.contains("2. Estimated calories before cooking"));
        assert!(prompt.contains("3. Estimated calories after cooking"));
        assert!(prompt.contains("step-by-step cooking instructions"));
    }

    #[test]
    fn test_ingredients_only_prompt() {
        let prompt = build_prompt("", &ingredients(&["egg", "rice"])).unwrap();

        assert!(prompt.starts_with("I have the following ingredients: egg, rice."));
        assert!(prompt.contains("1. Dish name"));
        assert!(prompt.contains("2. Estimated calories before and after cooking"));
        assert!(prompt.contains("3. Step-by-step instructions"));
        assert!(prompt.contains("4. Ingredient quantities"));
    }

    #[test]
    fn test_dish_name_only_prompt() {
        let prompt = build_prompt(" biryani ", &IngredientList::new()).unwrap();

        assert!(prompt.starts_with("Generate a detailed recipe for \"biryani\"."));
        assert!(prompt.contains("1. Ingredients list with quantities"));
        assert!(prompt.contains("2. Estimated calories before and after cooking"));
        assert!(prompt.contains("3. Step-by-step instructions."));
    }

    #[test]
    fn test_empty_inputs_build_nothing() {
        assert!(build_prompt("", &IngredientList::new()).is_none());
        assert!(SearchQuery::default().prompt().is_none());
    }

    #[test]
    fn test_search_query_prompt() {
        let query = SearchQuery::new("pasta", ingredients(&["Tomato"]));
        let prompt = query.prompt().unwrap();
        assert!(prompt.contains("ingredients: tomato."));
    }
}
