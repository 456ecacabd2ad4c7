//! Health handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use pantry_core::CompletionBackend;

/// Backend status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Configured completion backend, if any
    pub ai_backend: Option<&'static str>,
    pub ai_model: Option<String>,
    /// Whether the completion backend answered a health check
    pub ai_available: bool,
    pub search_configured: bool,
}

/// GET /api/health - Report which backends are configured and reachable
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let ai_available = match &state.ai {
        Some(client) => client.health_check().await,
        None => false,
    };

    Json(HealthResponse {
        status: "ok",
        ai_backend: state.ai.as_ref().map(|c| c.backend_name()),
        ai_model: state.ai.as_ref().map(|c| c.model().to_string()),
        ai_available,
        search_configured: state.search.is_some(),
    })
}
