//! Completion backend abstraction
//!
//! # Architecture
//!
//! - `CompletionBackend` trait: the interface the relay talks to
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OpenAICompatibleBackend`, `MockBackend`
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = AppConfig::load()?;
//! if let Some(client) = AIClient::from_config(&config.completion) {
//!     let content = client.complete("Generate a recipe for soup").await?;
//! }
//! ```
//!
//! The API key is read only here, inside the server process. Nothing in this
//! module is reachable from the CLI's `ask` path, which goes through the relay.

mod mock;
mod openai_compatible;

pub use mock::MockBackend;
pub use openai_compatible::{OpenAICompatibleBackend, DEFAULT_UPSTREAM_ERROR, MAX_TOKENS};

use async_trait::async_trait;

use crate::config::CompletionConfig;
use crate::error::Result;

/// Trait defining the interface for completion backends
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send a single user prompt and return the first choice's content
    ///
    /// `Ok(None)` means the upstream answered successfully but without content.
    async fn complete(&self, prompt: &str) -> Result<Option<String>>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Get the model name
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
#[derive(Clone)]
pub enum AIClient {
    /// OpenAI-compatible backend (OpenRouter)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from the completion config
    ///
    /// Checks `backend` to determine which backend to use:
    /// - `openrouter` (default): needs `OPENROUTER_API_KEY`
    /// - `mock`: canned responses, no network
    ///
    /// Returns None if the required credential is not set.
    pub fn from_config(config: &CompletionConfig) -> Option<Self> {
        match config.backend.to_lowercase().as_str() {
            "openrouter" | "openai" | "openai_compatible" => {
                OpenAICompatibleBackend::from_config(config).map(AIClient::OpenAICompatible)
            }
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %config.backend, "Unknown AI_BACKEND, falling back to openrouter");
                OpenAICompatibleBackend::from_config(config).map(AIClient::OpenAICompatible)
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }

    /// Backend name for display
    pub fn backend_name(&self) -> &'static str {
        match self {
            AIClient::OpenAICompatible(_) => "openrouter",
            AIClient::Mock(_) => "mock",
        }
    }
}

// Implement CompletionBackend for AIClient by delegating to the inner backend
#[async_trait]
impl CompletionBackend for AIClient {
    async fn complete(&self, prompt: &str) -> Result<Option<String>> {
        match self {
            AIClient::OpenAICompatible(b) => b.complete(prompt).await,
            AIClient::Mock(b) => b.complete(prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::OpenAICompatible(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}
