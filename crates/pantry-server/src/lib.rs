//! Pantry Web Server
//!
//! Axum-based API for the Pantry recipe finder. The server is the only
//! process that holds the completion API credential; front ends reach the
//! model through the relay endpoint.
//!
//! Endpoints:
//! - `POST /api/askAI`: AI recipe relay
//! - `GET /api/recipes?q=`: recipe search proxy
//! - `GET /api/health`: backend status
//! - `GET /api/suggestions`: suggested ingredient list
//!
//! Security features:
//! - Restrictive CORS policy
//! - Security headers on every response
//! - Sanitized error responses

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use pantry_core::{
    AIClient, AppConfig, CompletionBackend, RecipeSearchClient, RelayError, RELAY_PATH,
};

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    /// Completion backend for the relay (None when no credential is set)
    pub ai: Option<AIClient>,
    /// Recipe search client for the proxy (None when no credentials are set)
    pub search: Option<RecipeSearchClient>,
    pub app_config: AppConfig,
}

impl AppState {
    /// Build state from config, reading credentials from the environment
    pub fn from_config(app_config: AppConfig) -> Self {
        let ai = AIClient::from_config(&app_config.completion);
        match &ai {
            Some(client) => info!(
                backend = client.backend_name(),
                model = client.model(),
                host = client.host(),
                "AI backend configured"
            ),
            None => info!("ℹ️  AI backend not configured (set OPENROUTER_API_KEY to enable AI recipes)"),
        }

        let search = match RecipeSearchClient::from_config(&app_config.search) {
            Ok(client) => {
                info!(host = client.base_url(), "Recipe search configured");
                Some(client)
            }
            Err(e) => {
                info!("ℹ️  Recipe search proxy disabled: {}", e);
                None
            }
        };

        Self {
            ai,
            search,
            app_config,
        }
    }
}

/// Create the application router
pub fn create_router(
    state: Arc<AppState>,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> Router {
    let api_routes = Router::new()
        .route(RELAY_PATH, post(handlers::ask_ai))
        .route("/api/recipes", get(handlers::search_recipes))
        .route("/api/suggestions", get(handlers::suggestions))
        .route("/api/health", get(handlers::health));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    // CSP: scripts same-origin only; recipe images come from the search API's CDN
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' https: data:; connect-src 'self'; frame-ancestors 'none'"
    );

    let mut app = api_routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app_config = AppConfig::load().context("Failed to load config")?;
    let state = Arc::new(AppState::from_config(app_config));

    check_ai_connection(state.ai.as_ref()).await;

    let app = create_router(state, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

/// Check and log AI backend connection status
async fn check_ai_connection(ai: Option<&AIClient>) {
    match ai {
        Some(client) => {
            if client.health_check().await {
                info!(
                    "✅ AI backend connected: {} (model: {})",
                    client.host(),
                    client.model()
                );
            } else {
                warn!(
                    "⚠️  AI backend configured but not responding: {} (model: {})",
                    client.host(),
                    client.model()
                );
            }
        }
        None => {
            info!("ℹ️  AI relay will answer 500 until OPENROUTER_API_KEY is set");
        }
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
///
/// Serialized as `{"error": message}`.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Relay failure, keeping its status and message
    pub fn relay(err: RelayError) -> Self {
        Self {
            status: StatusCode::from_u16(err.status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: err.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Clients get a generic message; the cause is only logged
            message: "An internal error occurred".to_string(),
            internal: Some(err.into()),
        }
    }
}
