//! Recipe search proxy and ingredient suggestions

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::AppState;
use pantry_core::Hit;

/// Query parameters for recipe search
#[derive(Debug, Deserialize)]
pub struct RecipeSearchQuery {
    /// Dish name
    #[serde(default)]
    pub q: String,
}

/// Recipe search response
#[derive(Debug, Serialize)]
pub struct RecipeSearchResponse {
    pub hits: Vec<Hit>,
}

/// GET /api/recipes - Search recipes without exposing the search credentials
///
/// Failures are logged and answered with an empty list.
pub async fn search_recipes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecipeSearchQuery>,
) -> Json<RecipeSearchResponse> {
    let hits = match &state.search {
        Some(client) => client.search_recipes(&params.q).await,
        None => {
            if !params.q.trim().is_empty() {
                warn!("Recipe search requested but EDAMAM_APP_ID/EDAMAM_APP_KEY are not set");
            }
            Vec::new()
        }
    };

    Json(RecipeSearchResponse { hits })
}

/// GET /api/suggestions - Suggested ingredients
pub async fn suggestions(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.app_config.suggested_ingredients.clone())
}
