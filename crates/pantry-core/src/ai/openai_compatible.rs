//! OpenAI-compatible chat completions backend
//!
//! Works with any server implementing `POST {base_url}/chat/completions`,
//! OpenRouter in production (`https://openrouter.ai/api/v1`).
//!
//! # Configuration
//!
//! Environment variables:
//! - `OPENROUTER_API_KEY`: Bearer credential (required, server-side only)
//!
//! Base URL and model come from [`CompletionConfig`]. Every request is capped
//! at [`MAX_TOKENS`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CompletionConfig;
use crate::error::{Error, Result};

use super::CompletionBackend;

/// Message used when the upstream error body carries no message
pub const DEFAULT_UPSTREAM_ERROR: &str = "Failed to generate response";

/// Generation cap sent as `max_tokens`
pub const MAX_TOKENS: u32 = 5000;

/// OpenAI-compatible backend
#[derive(Clone)]
pub struct OpenAICompatibleBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAICompatibleBackend {
    /// Create a new backend without a credential
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: None,
        }
    }

    /// Attach a bearer credential
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Create from config plus `OPENROUTER_API_KEY` from the environment
    ///
    /// Returns None if the key is not set.
    pub fn from_config(config: &CompletionConfig) -> Option<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;
        Some(Self::new(&config.base_url, &config.model).with_api_key(&api_key))
    }

    fn request_body(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: MAX_TOKENS,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAICompatibleBackend {
    async fn complete(&self, prompt: &str) -> Result<Option<String>> {
        let mut req_builder = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&self.request_body(prompt));

        if let Some(ref api_key) = self.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req_builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, body = %body, "Completion API error");
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: upstream_error_message(&body),
            });
        }

        let chat_response: ChatCompletionResponse = response.json().await?;

        Ok(chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content))
    }

    async fn health_check(&self) -> bool {
        let mut req_builder = self.http_client.get(format!("{}/models", self.base_url));
        if let Some(ref api_key) = self.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        match req_builder.send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

/// Pull a human-readable message out of an upstream error body
///
/// Accepts `{"error": {"message": ..}}`, `{"error": ".."}` and
/// `{"message": ..}`; anything else yields [`DEFAULT_UPSTREAM_ERROR`].
fn upstream_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return DEFAULT_UPSTREAM_ERROR.to_string();
    };

    let message = value
        .get("error")
        .and_then(|e| e.get("message").or(Some(e)))
        .and_then(|m| m.as_str())
        .or_else(|| value.get("message").and_then(|m| m.as_str()))
        .filter(|m| !m.trim().is_empty());

    message.unwrap_or(DEFAULT_UPSTREAM_ERROR).to_string()
}

/// Chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

/// Chat message
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// Chat completion choice
#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatResponseMessage>,
}

/// Chat response message
#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
