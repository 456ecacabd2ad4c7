//! AI recipe relay
//!
//! The relay is the only component holding the completion API credential and
//! must run server-side. It forwards a prompt to a [`CompletionBackend`],
//! splits the generated text into non-empty lines and reports failures as a
//! message plus HTTP status:
//!
//! - 400 `"Prompt is required"` when the prompt is missing or empty (no
//!   upstream call is made)
//! - 500 for every upstream failure, carrying the upstream message when there
//!   is one
//!
//! [`RelayClient`] is the other side: what front ends use to reach the relay
//! endpoint without ever seeing the credential.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::ai::CompletionBackend;
use crate::error::{Error, Result};
use crate::session::RecipeGenerator;

/// Path of the relay endpoint on the server
pub const RELAY_PATH: &str = "/api/askAI";

/// Relay failure, mapped to an HTTP status by the server
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("Prompt is required")]
    Validation,

    #[error("{0}")]
    Upstream(String),
}

impl RelayError {
    /// HTTP status for this failure
    pub fn status(&self) -> u16 {
        match self {
            RelayError::Validation => 400,
            RelayError::Upstream(_) => 500,
        }
    }
}

impl From<Error> for RelayError {
    fn from(err: Error) -> Self {
        match err {
            Error::Upstream { message, .. } => RelayError::Upstream(message),
            other => RelayError::Upstream(other.to_string()),
        }
    }
}

/// Relay request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Relay success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub result: Vec<String>,
}

/// Forward a prompt to the completion backend and split the answer into lines
pub async fn complete_recipe<B>(
    backend: &B,
    prompt: Option<&str>,
) -> std::result::Result<Vec<String>, RelayError>
where
    B: CompletionBackend + ?Sized,
{
    let prompt = prompt
        .filter(|p| !p.is_empty())
        .ok_or(RelayError::Validation)?;

    let content = backend.complete(prompt).await.map_err(|e| {
        error!(error = %e, model = backend.model(), "Completion request failed");
        RelayError::from(e)
    })?;

    let content = content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| RelayError::from(Error::EmptyResponse))?;

    let lines = split_lines(&content);
    debug!(lines = lines.len(), "Completion relayed");
    Ok(lines)
}

/// Split on newlines, dropping lines that are blank after trimming
///
/// Kept lines are returned untrimmed, in order.
pub fn split_lines(content: &str) -> Vec<String> {
    content
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// HTTP client for the relay endpoint
#[derive(Clone)]
pub struct RelayClient {
    http_client: Client,
    base_url: String,
}

/// Relay response as seen by a client. `result` may be a list of lines or a
/// single string.
#[derive(Debug, Deserialize)]
struct RelayReply {
    #[serde(default)]
    result: Option<RelayResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelayResult {
    Lines(Vec<String>),
    Text(String),
}

impl RelayClient {
    /// Create a client for the relay server at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a prompt to the relay and return the generated lines
    pub async fn ask(&self, prompt: &str) -> Result<Vec<String>> {
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, RELAY_PATH))
            .json(&AskRequest {
                prompt: Some(prompt.to_string()),
            })
            .send()
            .await?;

        let status = response.status();
        let reply: RelayReply = response.json().await?;

        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: reply
                    .error
                    .unwrap_or_else(|| "Something went wrong".to_string()),
            });
        }

        match reply.result {
            Some(RelayResult::Lines(lines)) => Ok(lines),
            Some(RelayResult::Text(text)) => Ok(vec![text]),
            None => Err(Error::InvalidData("Relay response has no result".into())),
        }
    }
}

#[async_trait]
impl RecipeGenerator for RelayClient {
    async fn generate(&self, prompt: &str) -> Result<Vec<String>> {
        self.ask(prompt).await
    }
}
