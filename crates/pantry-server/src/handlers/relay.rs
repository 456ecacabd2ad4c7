//! AI recipe relay handler

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};

use crate::{AppError, AppState};
use pantry_core::{complete_recipe, AskRequest, AskResponse, RelayError};

/// POST /api/askAI - Generate a recipe from a prompt
///
/// The body is parsed as JSON whatever its content type. A body that does
/// not parse is a 500, a missing or empty prompt a 400.
pub async fn ask_ai(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AskResponse>, AppError> {
    let request: AskRequest = serde_json::from_slice(&body)?;
    let prompt = request.prompt;

    let Some(ai) = state.ai.as_ref() else {
        if prompt.as_deref().map_or(true, str::is_empty) {
            return Err(AppError::relay(RelayError::Validation));
        }
        return Err(AppError::internal("AI backend not configured"));
    };

    let result = complete_recipe(ai, prompt.as_deref())
        .await
        .map_err(AppError::relay)?;

    Ok(Json(AskResponse { result }))
}
